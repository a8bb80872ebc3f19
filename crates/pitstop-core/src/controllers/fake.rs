//! In-memory backend used by controller tests. Records every call.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::auth::{AuthError, AuthResult, AuthSession, AuthUser, SessionApi, SignUpOutcome};
use crate::models::{
    FavoriteMark, MaintenanceFields, MaintenanceId, MaintenanceRecord, NewMaintenance, Role,
    UserProfile,
};
use crate::remote::{RemoteDataClient, RemoteError, RemoteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetProfile,
    ListMaintenances,
    GetMaintenance,
    MaintenancesByIds,
    InsertMaintenance,
    UpdateMaintenance,
    DeleteMaintenance,
    ListFavorites,
    InsertFavorite,
    DeleteFavorite,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetProfile(String),
    ListMaintenances(String),
    GetMaintenance(MaintenanceId),
    MaintenancesByIds(Vec<MaintenanceId>),
    InsertMaintenance(NewMaintenance),
    UpdateMaintenance(MaintenanceId, MaintenanceFields),
    DeleteMaintenance(MaintenanceId),
    ListFavorites(String),
    InsertFavorite(String, MaintenanceId),
    DeleteFavorite(String, MaintenanceId),
}

impl Call {
    const fn op(&self) -> Op {
        match self {
            Self::GetProfile(_) => Op::GetProfile,
            Self::ListMaintenances(_) => Op::ListMaintenances,
            Self::GetMaintenance(_) => Op::GetMaintenance,
            Self::MaintenancesByIds(_) => Op::MaintenancesByIds,
            Self::InsertMaintenance(_) => Op::InsertMaintenance,
            Self::UpdateMaintenance(..) => Op::UpdateMaintenance,
            Self::DeleteMaintenance(_) => Op::DeleteMaintenance,
            Self::ListFavorites(_) => Op::ListFavorites,
            Self::InsertFavorite(..) => Op::InsertFavorite,
            Self::DeleteFavorite(..) => Op::DeleteFavorite,
        }
    }
}

#[derive(Default)]
struct State {
    maintenances: Vec<MaintenanceRecord>,
    favorites: Vec<FavoriteMark>,
    profiles: HashMap<String, Role>,
    calls: Vec<Call>,
    failing: HashSet<Op>,
}

/// Pauses one operation until released, to interleave deactivation.
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct FakeRemote {
    state: Mutex<State>,
    gate: Mutex<Option<(Op, Gate)>>,
}

pub fn record(user_id: &str, title: &str, date: &str, mileage: f64) -> MaintenanceRecord {
    MaintenanceRecord {
        id: MaintenanceId::new(),
        user_id: user_id.to_string(),
        vehicle_id: None,
        title: title.to_string(),
        description: None,
        mileage,
        cost: None,
        location: None,
        date: date.to_string(),
    }
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_record(&self, record: MaintenanceRecord) -> MaintenanceId {
        let id = record.id;
        self.state.lock().unwrap().maintenances.push(record);
        id
    }

    pub fn add_favorite(&self, user_id: &str, id: MaintenanceId) {
        self.state
            .lock()
            .unwrap()
            .favorites
            .push(FavoriteMark::new(user_id, id));
    }

    pub fn set_role(&self, user_id: &str, role: Role) {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(user_id.to_string(), role);
    }

    pub fn fail(&self, op: Op) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.state.lock().unwrap().failing.remove(&op);
    }

    pub fn install_gate(&self, op: Op) -> Gate {
        let gate = Gate::default();
        *self.gate.lock().unwrap() = Some((op, gate.clone()));
        gate
    }

    async fn pause_at(&self, op: Op) {
        let gate = self
            .gate
            .lock()
            .unwrap()
            .clone()
            .filter(|(gated, _)| *gated == op);
        if let Some((_, gate)) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls().iter().filter(|call| call.op() == op).count()
    }

    pub fn favorites(&self) -> Vec<FavoriteMark> {
        self.state.lock().unwrap().favorites.clone()
    }

    pub fn maintenances(&self) -> Vec<MaintenanceRecord> {
        self.state.lock().unwrap().maintenances.clone()
    }

    fn enter(&self, call: Call) -> RemoteResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        let op = call.op();
        state.calls.push(call);
        if state.failing.contains(&op) {
            return Err(RemoteError::Api(format!("{op:?} rejected (500)")));
        }
        Ok(state)
    }
}

#[async_trait]
impl RemoteDataClient for FakeRemote {
    async fn get_profile(&self, user_id: &str) -> RemoteResult<Option<UserProfile>> {
        let state = self.enter(Call::GetProfile(user_id.to_string()))?;
        Ok(state.profiles.get(user_id).map(|role| UserProfile {
            id: user_id.to_string(),
            role: *role,
        }))
    }

    async fn list_maintenances(&self, user_id: &str) -> RemoteResult<Vec<MaintenanceRecord>> {
        self.pause_at(Op::ListMaintenances).await;

        let state = self.enter(Call::ListMaintenances(user_id.to_string()))?;
        let mut rows = state
            .maintenances
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|left, right| right.date.cmp(&left.date));
        Ok(rows)
    }

    async fn get_maintenance(
        &self,
        id: &MaintenanceId,
    ) -> RemoteResult<Option<MaintenanceRecord>> {
        let state = self.enter(Call::GetMaintenance(*id))?;
        Ok(state
            .maintenances
            .iter()
            .find(|record| record.id == *id)
            .cloned())
    }

    async fn maintenances_by_ids(
        &self,
        ids: &[MaintenanceId],
    ) -> RemoteResult<Vec<MaintenanceRecord>> {
        let state = self.enter(Call::MaintenancesByIds(ids.to_vec()))?;
        Ok(state
            .maintenances
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect())
    }

    async fn insert_maintenance(&self, new: &NewMaintenance) -> RemoteResult<()> {
        let mut state = self.enter(Call::InsertMaintenance(new.clone()))?;
        state.maintenances.push(MaintenanceRecord {
            id: MaintenanceId::new(),
            user_id: new.user_id.clone(),
            vehicle_id: new.vehicle_id.clone(),
            title: new.fields.title.clone(),
            description: Some(new.fields.description.clone()),
            mileage: new.fields.mileage,
            cost: Some(new.fields.cost),
            location: Some(new.fields.location.clone()),
            date: new.fields.date.clone(),
        });
        Ok(())
    }

    async fn update_maintenance(
        &self,
        id: &MaintenanceId,
        fields: &MaintenanceFields,
    ) -> RemoteResult<()> {
        let mut state = self.enter(Call::UpdateMaintenance(*id, fields.clone()))?;
        if let Some(record) = state.maintenances.iter_mut().find(|r| r.id == *id) {
            record.title.clone_from(&fields.title);
            record.description = Some(fields.description.clone());
            record.mileage = fields.mileage;
            record.cost = Some(fields.cost);
            record.location = Some(fields.location.clone());
            record.date.clone_from(&fields.date);
        }
        Ok(())
    }

    async fn delete_maintenance(&self, id: &MaintenanceId) -> RemoteResult<()> {
        let mut state = self.enter(Call::DeleteMaintenance(*id))?;
        state.maintenances.retain(|record| record.id != *id);
        Ok(())
    }

    async fn list_favorites(&self, user_id: &str) -> RemoteResult<Vec<FavoriteMark>> {
        let state = self.enter(Call::ListFavorites(user_id.to_string()))?;
        Ok(state
            .favorites
            .iter()
            .filter(|mark| mark.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_favorite(
        &self,
        user_id: &str,
        maintenance_id: &MaintenanceId,
    ) -> RemoteResult<()> {
        self.pause_at(Op::InsertFavorite).await;

        let mut state = self.enter(Call::InsertFavorite(user_id.to_string(), *maintenance_id))?;
        let mark = FavoriteMark::new(user_id, *maintenance_id);
        if state.favorites.contains(&mark) {
            return Err(RemoteError::Api(
                "duplicate key value violates unique constraint (409)".to_string(),
            ));
        }
        state.favorites.push(mark);
        Ok(())
    }

    async fn delete_favorite(
        &self,
        user_id: &str,
        maintenance_id: &MaintenanceId,
    ) -> RemoteResult<()> {
        let mut state = self.enter(Call::DeleteFavorite(user_id.to_string(), *maintenance_id))?;
        state
            .favorites
            .retain(|mark| !(mark.user_id == user_id && mark.maintenance_id == *maintenance_id));
        Ok(())
    }
}

/// In-memory session API with a single known account.
#[derive(Default)]
pub struct FakeSessionApi {
    pub session: Mutex<Option<AuthSession>>,
    pub sign_ups: Mutex<Vec<String>>,
    pub fail_sign_out: bool,
}

pub const KNOWN_EMAIL: &str = "driver@example.com";
pub const KNOWN_PASSWORD: &str = "hunter22";

#[async_trait]
impl SessionApi for FakeSessionApi {
    async fn current_user(&self) -> AuthResult<Option<AuthUser>> {
        Ok(self
            .session
            .lock()
            .unwrap()
            .as_ref()
            .map(|session| session.user.clone()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        if email != KNOWN_EMAIL || password != KNOWN_PASSWORD {
            return Err(AuthError::Api("Invalid login credentials (400)".to_string()));
        }
        let session = AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some(email.to_string()),
            },
        };
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, _password: &str) -> AuthResult<SignUpOutcome> {
        if email == KNOWN_EMAIL {
            return Err(AuthError::Api("User already registered (422)".to_string()));
        }
        self.sign_ups.lock().unwrap().push(email.to_string());
        Ok(SignUpOutcome::ConfirmationRequired)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        if self.fail_sign_out {
            return Err(AuthError::Api("network unreachable".to_string()));
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
