//! Integration tests for the mutation API.

mod helpers;

use docvault_auth::{Capability, RbacEnforcer, RbacPolicies};
use docvault_core::ErrorKind;
use docvault_core::types::{FileId, FolderId, UserId};
use docvault_entity::{
    CreateUserRequest, FileAccess, FilePermission, FolderAccess, NewFile, RiskLevel, UserRole,
};

use helpers::TestVault;

#[test]
fn test_grant_write_without_read_is_invalid_combination() {
    let vault = TestVault::new();
    let err = vault
        .state
        .mutations()
        .grant_folder_permission(
            &vault.actor("admin1"),
            &FolderId::from("folder2"),
            &UserId::from("user2"),
            FolderAccess::new(false, true, false),
        )
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidPermissionCombination));
    assert!(
        vault
            .state
            .store
            .list_folder_permissions(&FolderId::from("folder2"))
            .unwrap()
            .iter()
            .all(|p| p.user_id() != &UserId::from("user2"))
    );
}

#[test]
fn test_assign_read_resolves_to_read_and_assigns() {
    let vault = TestVault::new();
    let (file_id, user_id) = (FileId::from("5"), UserId::from("user3"));

    vault
        .state
        .mutations()
        .assign_file_to_user(&vault.actor("admin1"), &file_id, &user_id, FilePermission::Read)
        .unwrap();

    let access = vault
        .state
        .resolver
        .file_access_by_id(&vault.state.store, &user_id, &file_id);
    assert_eq!(access, FileAccess::Read);
    assert!(
        vault
            .state
            .store
            .get_file(&file_id)
            .unwrap()
            .is_assigned_to(&user_id)
    );
}

#[test]
fn test_unassign_resolves_to_none_and_unassigns() {
    let vault = TestVault::new();
    let (file_id, user_id) = (FileId::from("3"), UserId::from("user1"));

    vault
        .state
        .mutations()
        .unassign_file_from_user(&vault.actor("admin1"), &file_id, &user_id)
        .unwrap();

    let access = vault
        .state
        .resolver
        .file_access_by_id(&vault.state.store, &user_id, &file_id);
    assert_eq!(access, FileAccess::None);
    assert!(
        !vault
            .state
            .store
            .get_file(&file_id)
            .unwrap()
            .is_assigned_to(&user_id)
    );
}

#[test]
fn test_create_folder_requires_admin() {
    let vault = TestVault::new();
    let mutations = vault.state.mutations();

    let err = mutations
        .create_folder(&vault.actor("user1"), "Drafts", None)
        .unwrap_err();
    assert!(err.is(ErrorKind::PermissionDenied));

    let folder = mutations
        .create_folder(&vault.actor("admin1"), "Drafts", None)
        .unwrap();
    let stored = vault.state.store.get_folder(&folder.id).unwrap();
    assert_eq!(stored.path, "/Drafts");
    assert_eq!(stored.created_by, UserId::from("admin1"));
}

#[test]
fn test_delete_folder_detaches_files_and_drops_rows() {
    let vault = TestVault::new();
    let folder_id = FolderId::from("folder1");

    let deletion = vault
        .state
        .mutations()
        .delete_folder(&vault.actor("admin1"), &folder_id)
        .unwrap();
    assert_eq!(deletion.detached_files, 1);
    assert_eq!(deletion.removed_permissions, 2);

    let roadmap = vault.state.store.get_file(&FileId::from("2")).unwrap();
    assert_eq!(roadmap.folder_id, None);
    assert!(vault.state.store.get_folder(&folder_id).is_err());
    assert!(
        vault
            .state
            .store
            .list_permissions_for_user(&UserId::from("user2"))
            .unwrap()
            .is_empty()
    );
}

fn new_file(name: &str) -> NewFile {
    NewFile {
        name: name.to_string(),
        file_type: "pdf".to_string(),
        size: "1.0 MB".to_string(),
        risk_level: RiskLevel::Low,
        folder_id: None,
    }
}

#[test]
fn test_non_admin_mutations_leave_store_untouched() {
    let vault = TestVault::new();
    let mutations = vault.state.mutations();
    let user = vault.actor("user1");
    let (folder1, user2) = (FolderId::from("folder1"), UserId::from("user2"));

    let before = vault.state.store.snapshot().unwrap().clone();

    let results = [
        mutations.create_folder(&user, "Mine", None).map(|_| ()),
        mutations.delete_folder(&user, &FolderId::from("folder6")).map(|_| ()),
        mutations.rename_folder(&user, &folder1, "Renamed").map(|_| ()),
        mutations
            .grant_folder_permission(&user, &folder1, &user.user_id, FolderAccess::new(true, true, true))
            .map(|_| ()),
        mutations.revoke_folder_permission(&user, &folder1, &user2).map(|_| ()),
        mutations.delete_file(&user, &FileId::from("1")).map(|_| ()),
        mutations
            .assign_file_to_user(&user, &FileId::from("6"), &user.user_id, FilePermission::Write)
            .map(|_| ()),
        mutations
            .unassign_file_from_user(&user, &FileId::from("1"), &user2)
            .map(|_| ()),
        mutations
            .set_file_assignments(&user, &FileId::from("1"), &[(user.user_id.clone(), FilePermission::Write)])
            .map(|_| ()),
        mutations
            .move_file(&user, &FileId::from("1"), Some(&FolderId::from("folder6")))
            .map(|_| ()),
        mutations.upload_file(&user, new_file("Mine.pdf")).map(|_| ()),
        mutations
            .set_user_folder_access(&user, &user.user_id, &[(FolderId::from("folder6"), FolderAccess::read_only())])
            .map(|_| ()),
        mutations
            .create_user(
                &user,
                CreateUserRequest {
                    name: "Mallory".to_string(),
                    email: "mallory@example.com".to_string(),
                    role: UserRole::Admin,
                },
            )
            .map(|_| ()),
        mutations.delete_user(&user, &user2).map(|_| ()),
        mutations.reconcile_assignments(&user).map(|_| ()),
    ];

    for (i, result) in results.into_iter().enumerate() {
        let err = result.expect_err("non-admin mutation must fail");
        assert!(err.is(ErrorKind::PermissionDenied), "call {i}: {err}");
    }

    let after = vault.state.store.snapshot().unwrap();
    assert_eq!(after.users(), before.users());
    assert_eq!(after.folders(), before.folders());
    assert_eq!(after.files(), before.files());
    assert_eq!(after.folder_permissions(), before.folder_permissions());
    assert!(vault.state.activity.is_empty());
}

#[test]
fn test_custom_policies_gate_mutations() {
    let vault = TestVault::new();
    let mut policies = RbacPolicies::new();
    policies.grant(UserRole::User, Capability::UploadFile);
    policies.revoke(UserRole::Admin, Capability::DeleteFile);
    let state = vault
        .state
        .clone()
        .with_enforcer(RbacEnforcer::with_policies(policies));
    let mutations = state.mutations();

    let file = mutations
        .upload_file(&vault.actor("user1"), new_file("Field Notes.pdf"))
        .unwrap();
    assert_eq!(file.uploaded_by, vault.user("user1").name);

    let err = mutations
        .delete_file(&vault.actor("admin1"), &file.id)
        .unwrap_err();
    assert!(err.is(ErrorKind::PermissionDenied));
    assert!(state.store.get_file(&file.id).is_ok());

    let mut session = state.session();
    session.login(&vault.user("user1")).unwrap();
    assert!(session.can(Capability::UploadFile));
    assert!(!session.can(Capability::ManageUsers));
}

#[test]
fn test_mutations_keep_lists_synchronized() {
    let vault = TestVault::new();
    let mutations = vault.state.mutations();
    let admin = vault.actor("admin1");

    mutations.reconcile_assignments(&admin).unwrap();
    mutations
        .assign_file_to_user(&admin, &FileId::from("2"), &UserId::from("user2"), FilePermission::Write)
        .unwrap();
    mutations
        .unassign_file_from_user(&admin, &FileId::from("1"), &UserId::from("user1"))
        .unwrap();
    mutations
        .set_file_assignments(
            &admin,
            &FileId::from("6"),
            &[
                (UserId::from("user1"), FilePermission::Read),
                (UserId::from("user3"), FilePermission::Write),
            ],
        )
        .unwrap();

    assert!(vault.state.store.assignment_drift().unwrap().is_empty());
}

#[test]
fn test_activity_feed_is_newest_first() {
    let vault = TestVault::new();
    let mutations = vault.state.mutations();
    let admin = vault.actor("admin1");

    mutations.create_folder(&admin, "Archive", None).unwrap();
    mutations.delete_file(&admin, &FileId::from("6")).unwrap();

    let recent = vault
        .state
        .browse()
        .recent_activity(&vault.login("admin1"), 10)
        .unwrap();
    let actions: Vec<&str> = recent.iter().map(|e| e.action()).collect();
    assert_eq!(actions, vec!["deleted", "created"]);
    assert!(recent.iter().all(|e| e.actor_id == admin.user_id));
}
