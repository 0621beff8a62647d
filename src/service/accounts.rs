use tracing::info;

use crate::error::HrResult;
use crate::model::user::{UserAccount, UserSummary};
use crate::store::DocumentStore;

/// Plaintext credential match against the stored accounts.
pub fn authenticate(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
) -> HrResult<Option<UserAccount>> {
    let dataset = store.read_all()?;
    let account = dataset
        .users
        .into_iter()
        .find(|u| u.email == email && u.password == password);

    info!(email, matched = account.is_some(), "Credential check");
    Ok(account)
}

pub fn list_users(store: &dyn DocumentStore) -> HrResult<Vec<UserSummary>> {
    let dataset = store.read_all()?;
    Ok(dataset.users.iter().map(UserSummary::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn seeded_admin_can_authenticate() {
        let store = MemoryStore::seeded();

        let admin = authenticate(&store, "admin@ayateke.com", "admin123").unwrap();
        assert_eq!(admin.map(|u| u.role), Some("admin".to_string()));

        assert!(authenticate(&store, "admin@ayateke.com", "ADMIN123").unwrap().is_none());
        assert!(authenticate(&store, "nobody@ayateke.com", "admin123").unwrap().is_none());
    }

    #[test]
    fn listing_users_hides_passwords() {
        let store = MemoryStore::seeded();
        let users = list_users(&store).unwrap();

        assert_eq!(users.len(), 2);
        let json = serde_json::to_value(&users).unwrap();
        assert!(json[0].get("password").is_none());
    }
}
