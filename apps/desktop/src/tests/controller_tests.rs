use super::*;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use client_core::DirectoryError;
use serde_json::json;
use shared::domain::{FormMode, UserRecord};
use tokio::sync::Mutex;

use crate::view::StatusKind;

#[derive(Default)]
struct FakeDirectory {
    listing: Vec<UserRecord>,
    next_id: i64,
    failing: Arc<AtomicBool>,
    deleted: Arc<Mutex<Vec<UserId>>>,
}

impl FakeDirectory {
    fn with_users() -> Self {
        Self {
            listing: serde_json::from_value(json!([
                {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz", "phone": "1-770"},
                {"id": 2, "name": "Ervin Howell", "email": "Shanna@melissa.tv", "phone": "010-692"},
            ]))
            .expect("listing"),
            next_id: 11,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), DirectoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(DirectoryError::Status(500))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        self.check()?;
        Ok(self.listing.clone())
    }

    async fn create_user(&self, input: &UserInput) -> Result<UserRecord, DirectoryError> {
        self.check()?;
        Ok(UserRecord::from_value(json!({
            "name": input.name,
            "email": input.email,
            "id": self.next_id,
        }))
        .expect("record"))
    }

    async fn update_user(
        &self,
        id: UserId,
        input: &UserInput,
    ) -> Result<UserRecord, DirectoryError> {
        self.check()?;
        Ok(UserRecord::from_value(json!({"id": id.0, "name": input.name})).expect("record"))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), DirectoryError> {
        self.check()?;
        self.deleted.lock().await.push(id);
        Ok(())
    }
}

async fn loaded() -> Controller<FakeDirectory> {
    let mut controller = Controller::new(FakeDirectory::with_users());
    controller.load().await;
    controller
}

fn status_text<D: UserDirectory>(controller: &Controller<D>) -> (&str, StatusKind) {
    let status = controller.status.as_ref().expect("status");
    (status.text.as_str(), status.kind)
}

#[tokio::test]
async fn load_reports_success() {
    let controller = loaded().await;

    assert_eq!(status_text(&controller), ("Users loaded.", StatusKind::Success));
    assert_eq!(controller.store.users().len(), 2);
}

#[tokio::test]
async fn load_failure_reports_error_and_keeps_empty_table() {
    let directory = FakeDirectory::with_users();
    directory.failing.store(true, Ordering::SeqCst);
    let mut controller = Controller::new(directory);

    controller.load().await;

    assert_eq!(
        status_text(&controller),
        ("Failed to fetch users.", StatusKind::Error)
    );
    assert!(controller.store.users().is_empty());
}

#[tokio::test]
async fn add_appends_row_with_existing_columns() {
    let mut controller = loaded().await;

    let flow = controller
        .handle_line(r#"add "Kurtis Weissnat" Telly.Hoeger@billy.biz"#)
        .await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(status_text(&controller), ("User created.", StatusKind::Success));
    let created = &controller.store.users()[2];
    assert_eq!(created.id(), Some(UserId(11)));
    assert_eq!(
        created.field_names().collect::<Vec<_>>(),
        vec!["id", "name", "email", "phone"]
    );
    assert_eq!(created.text_field("phone"), "");
    assert_eq!(&controller.form, &UserInput::default());
}

#[tokio::test]
async fn edit_prefills_form_and_submit_updates() {
    let mut controller = loaded().await;

    controller.handle_line("edit 2").await;
    assert_eq!(
        &controller.form,
        &UserInput::new("Ervin Howell", "Shanna@melissa.tv")
    );
    assert_eq!(controller.store.form_mode(), FormMode::Edit(UserId(2)));
    assert!(controller.render().contains("submit to Update"));

    controller.handle_line(r#"name "Ervin H.""#).await;
    controller.handle_line("submit").await;

    assert_eq!(status_text(&controller), ("User updated.", StatusKind::Success));
    assert_eq!(controller.store.form_mode(), FormMode::Create);
    let updated = controller.store.find(UserId(2)).expect("user");
    assert_eq!(updated.text_field("name"), "Ervin H.");
    assert_eq!(updated.text_field("email"), "Shanna@melissa.tv");
    assert_eq!(updated.text_field("phone"), "010-692");
}

#[tokio::test]
async fn editing_unknown_user_is_an_error() {
    let mut controller = loaded().await;

    controller.handle_line("edit 9").await;

    assert_eq!(
        status_text(&controller),
        ("No user with id 9.", StatusKind::Error)
    );
    assert_eq!(controller.store.form_mode(), FormMode::Create);
}

#[tokio::test]
async fn deleting_edited_user_resets_form() {
    let directory = FakeDirectory::with_users();
    let deleted = directory.deleted.clone();
    let mut controller = Controller::new(directory);
    controller.load().await;
    controller.handle_line("edit 1").await;

    controller.handle_line("delete 1").await;

    assert_eq!(status_text(&controller), ("User deleted.", StatusKind::Success));
    assert_eq!(controller.store.form_mode(), FormMode::Create);
    assert_eq!(&controller.form, &UserInput::default());
    assert_eq!(deleted.lock().await.as_slice(), &[UserId(1)]);
    assert!(controller.store.find(UserId(1)).is_none());
}

#[tokio::test]
async fn failed_submit_keeps_form_and_mode() {
    let mut controller = loaded().await;
    controller.handle_line("edit 1").await;
    controller
        .store
        .directory()
        .failing
        .store(true, Ordering::SeqCst);

    controller.handle_line("submit").await;

    assert_eq!(
        status_text(&controller),
        ("Failed to submit form.", StatusKind::Error)
    );
    assert_eq!(controller.store.form_mode(), FormMode::Edit(UserId(1)));
    assert_eq!(controller.form.name, "Leanne Graham");
}

#[tokio::test]
async fn bad_command_is_reported() {
    let mut controller = loaded().await;

    controller.handle_line("delete me").await;

    let (text, kind) = status_text(&controller);
    assert_eq!(kind, StatusKind::Error);
    assert!(text.contains("invalid user id 'me'"), "got {text}");
}

#[tokio::test]
async fn quit_stops_the_loop() {
    let mut controller = loaded().await;
    assert_eq!(controller.handle_line("quit").await, Flow::Quit);
}
