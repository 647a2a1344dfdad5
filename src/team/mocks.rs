#![allow(clippy::significant_drop_tightening)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{CreateTeamMember, TeamMemberRepository, UpdateTeamMember};
use super::types::TeamMember;
use crate::AccessError;

/// In-memory team-member store.
///
/// Clones share the same records. Lookups can be made to fail or to hang,
/// which is how the resolver's failure policy and cancellation are tested.
#[derive(Clone)]
pub struct MockTeamMemberRepository {
    members: Arc<RwLock<BTreeMap<u64, TeamMember>>>,
    next_id: Arc<AtomicU64>,
    fail_lookups: Arc<AtomicBool>,
    stall_lookups: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl MockTeamMemberRepository {
    pub fn new() -> Self {
        Self {
            members: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            fail_lookups: Arc::new(AtomicBool::new(false)),
            stall_lookups: Arc::new(AtomicBool::new(false)),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Inserts a record as-is, assigning a fresh id.
    pub fn insert(&self, mut member: TeamMember) -> TeamMember {
        member.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut members) = self.members.write() {
            members.insert(member.id, member.clone());
        }
        member
    }

    /// Makes every principal lookup return [`AccessError::LookupFailed`].
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Makes every principal lookup pend forever.
    pub fn stall_lookups(&self, stall: bool) {
        self.stall_lookups.store(stall, Ordering::SeqCst);
    }

    /// Number of principal lookups started so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.members.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn before_lookup(&self) -> Result<(), AccessError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.stall_lookups.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AccessError::LookupFailed("store unreachable".to_owned()));
        }
        Ok(())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<u64, TeamMember>>, AccessError> {
        self.members
            .read()
            .map_err(|_| AccessError::Internal("lock poisoned".into()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<u64, TeamMember>>, AccessError> {
        self.members
            .write()
            .map_err(|_| AccessError::Internal("lock poisoned".into()))
    }
}

impl Default for MockTeamMemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamMemberRepository for MockTeamMemberRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<TeamMember>, AccessError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_by_principal_id(
        &self,
        principal_id: &str,
    ) -> Result<Option<TeamMember>, AccessError> {
        self.before_lookup().await?;
        Ok(self
            .read()?
            .values()
            .find(|m| m.principal_id.as_deref() == Some(principal_id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, AccessError> {
        self.before_lookup().await?;
        Ok(self
            .read()?
            .values()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<TeamMember>, AccessError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn create(&self, data: CreateTeamMember) -> Result<TeamMember, AccessError> {
        let mut members = self.write()?;

        if members.values().any(|m| {
            m.email.eq_ignore_ascii_case(&data.email)
                || (data.principal_id.is_some() && m.principal_id == data.principal_id)
        }) {
            return Err(AccessError::AlreadyExists);
        }

        let now = Utc::now();
        let member = TeamMember {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            principal_id: data.principal_id,
            email: data.email,
            name: data.name,
            role: data.role,
            permissions: data.permissions,
            department: data.department,
            position: data.position,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        members.insert(member.id, member.clone());

        Ok(member)
    }

    async fn update(&self, id: u64, data: UpdateTeamMember) -> Result<TeamMember, AccessError> {
        let mut members = self.write()?;
        let member = members.get_mut(&id).ok_or(AccessError::NotFound)?;

        if let Some(principal_id) = data.principal_id {
            member.principal_id = Some(principal_id);
        }
        if let Some(name) = data.name {
            member.name = name;
        }
        if let Some(role) = data.role {
            member.role = role;
        }
        if let Some(permissions) = data.permissions {
            member.permissions = permissions;
        }
        if let Some(department) = data.department {
            member.department = Some(department);
        }
        if let Some(position) = data.position {
            member.position = Some(position);
        }
        if let Some(status) = data.status {
            member.status = status;
        }
        member.updated_at = Utc::now();

        Ok(member.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), AccessError> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(AccessError::NotFound)
    }
}
