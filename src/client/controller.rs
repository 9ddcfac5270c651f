//! Client state controller.

use tracing::{debug, warn};

use super::view::derive;
use super::{ClientError, TodoApi};
use crate::types::{Filter, SortOrder, Todo, TodoInput, TodoPayload, TodoStats};

/// Editable form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl FormState {
    fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
        }
    }

    /// Validate the fields the same way the server does.
    pub fn to_input(&self) -> Result<TodoInput, ClientError> {
        let payload = TodoPayload {
            title: Some(self.title.clone()),
            descp: Some(self.description.clone()),
            completed: Some(self.completed),
        };
        Ok(payload.validate()?)
    }
}

/// A destructive action waiting for confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingAction {
    #[default]
    None,
    DeleteOne(i64),
    DeleteAll,
}

/// Result of asking to stage a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// A confirmation prompt is now pending.
    Staged,
    /// The collection is empty; nothing was staged.
    NothingToDelete,
}

/// Holds everything a todo UI renders and mediates every call to the server.
///
/// Every successful mutation is followed by a full reload; nothing is updated
/// optimistically.
pub struct TodoController<A> {
    api: A,
    todos: Vec<Todo>,
    form: FormState,
    form_open: bool,
    editing: Option<i64>,
    filter: Filter,
    sort: SortOrder,
    pending: PendingAction,
    prompt: Option<String>,
    last_error: Option<String>,
}

impl<A: TodoApi> TodoController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            form: FormState::default(),
            form_open: false,
            editing: None,
            filter: Filter::default(),
            sort: SortOrder::default(),
            pending: PendingAction::None,
            prompt: None,
            last_error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the full collection and replace local state.
    ///
    /// On failure the previous collection is kept and the error is recorded
    /// in [`last_error`](Self::last_error).
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(todos) => {
                debug!(count = todos.len(), "Loaded todos");
                self.todos = todos;
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.record("load todos", e)),
        }
    }

    /// The full loaded collection, in server order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The filtered and sorted view.
    pub fn visible(&self) -> Vec<&Todo> {
        derive(&self.todos, self.filter, self.sort)
    }

    pub fn stats(&self) -> TodoStats {
        TodoStats::from_todos(&self.todos)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Id of the todo being edited, if any.
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Open an empty form for a new todo.
    pub fn begin_create(&mut self) {
        self.form = FormState::default();
        self.editing = None;
        self.form_open = true;
    }

    /// Open the form pre-filled with the todo `id`.
    pub fn begin_edit(&mut self, id: i64) -> Result<(), ClientError> {
        let form = FormState::from_todo(self.find(id)?);
        self.form = form;
        self.editing = Some(id);
        self.form_open = true;
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.form = FormState::default();
        self.editing = None;
        self.form_open = false;
    }

    /// Send the form: an update when editing, a create otherwise.
    ///
    /// On success the form is cleared and closed and the collection is
    /// reloaded. On failure the form stays as it was.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let input = match self.form.to_input() {
            Ok(input) => input,
            Err(e) => return Err(self.record("validate form", e)),
        };

        let result = match self.editing {
            Some(id) => self.api.update(id, &input).await.map(|_| ()),
            None => self.api.create(&input).await.map(|_| ()),
        };
        if let Err(e) = result {
            return Err(self.record("save todo", e));
        }

        self.close_form();
        self.reload().await;
        Ok(())
    }

    /// Stage deletion of one todo behind a confirmation prompt.
    pub fn request_delete(&mut self, id: i64) -> Result<StageOutcome, ClientError> {
        let title = self.find(id)?.title.clone();
        self.stage(
            PendingAction::DeleteOne(id),
            format!("Are you sure you want to delete the task \"{}\"?", title),
        );
        Ok(StageOutcome::Staged)
    }

    /// Stage deletion of every todo behind a confirmation prompt.
    pub fn request_delete_all(&mut self) -> StageOutcome {
        if self.todos.is_empty() {
            return StageOutcome::NothingToDelete;
        }
        self.stage(
            PendingAction::DeleteAll,
            format!(
                "Are you sure you want to delete ALL tasks ({} tasks)?",
                self.todos.len()
            ),
        );
        StageOutcome::Staged
    }

    pub fn pending(&self) -> PendingAction {
        self.pending
    }

    /// Message for the pending confirmation, if one is staged.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Execute the staged action, if any, then reload.
    ///
    /// Returns the action that was executed. The pending slot is cleared
    /// whether or not the call succeeds.
    pub async fn confirm(&mut self) -> Result<PendingAction, ClientError> {
        let action = std::mem::take(&mut self.pending);
        self.prompt = None;

        let result = match action {
            PendingAction::None => return Ok(action),
            PendingAction::DeleteOne(id) => self.api.delete(id).await,
            PendingAction::DeleteAll => self.api.delete_all().await,
        };
        if let Err(e) = result {
            return Err(self.record("delete", e));
        }

        self.reload().await;
        Ok(action)
    }

    /// Discard the staged action.
    pub fn cancel(&mut self) {
        self.pending = PendingAction::None;
        self.prompt = None;
    }

    fn stage(&mut self, action: PendingAction, prompt: String) {
        self.pending = action;
        self.prompt = Some(prompt);
    }

    fn find(&self, id: i64) -> Result<&Todo, ClientError> {
        self.todos
            .iter()
            .find(|t| t.id == id)
            .ok_or(ClientError::NotFound(id))
    }

    /// Reload after a mutation. A failed reload leaves stale data and is only
    /// recorded.
    async fn reload(&mut self) {
        let _ = self.load().await;
    }

    fn record(&mut self, action: &str, err: ClientError) -> ClientError {
        warn!(action, error = %err, "Todo request failed");
        self.last_error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory server stand-in.
    #[derive(Default)]
    struct FakeApi {
        todos: Mutex<Vec<Todo>>,
        next_id: AtomicUsize,
        fail: AtomicBool,
        list_calls: AtomicUsize,
        mutations: AtomicUsize,
    }

    impl FakeApi {
        fn with_titles(titles: &[&str]) -> Self {
            let api = FakeApi::default();
            for title in titles {
                api.insert(TodoInput::new(*title, "", false));
            }
            api
        }

        fn insert(&self, input: TodoInput) -> Todo {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
            let todo = Todo {
                id,
                title: input.title,
                description: input.description,
                completed: input.completed,
                created_at: 1,
                updated_at: None,
            };
            self.todos.lock().unwrap().push(todo.clone());
            todo
        }

        fn check(&self) -> Result<(), ClientError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(ClientError::Status {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn mutated(&self) -> Result<(), ClientError> {
            self.check()?;
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl TodoApi for FakeApi {
        async fn list(&self) -> Result<Vec<Todo>, ClientError> {
            self.check()?;
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.todos.lock().unwrap().clone())
        }

        async fn create(&self, input: &TodoInput) -> Result<Todo, ClientError> {
            self.mutated()?;
            Ok(self.insert(input.clone()))
        }

        async fn get(&self, id: i64) -> Result<Option<Todo>, ClientError> {
            self.check()?;
            Ok(self.todos.lock().unwrap().iter().find(|t| t.id == id).cloned())
        }

        async fn update(&self, id: i64, input: &TodoInput) -> Result<Vec<Todo>, ClientError> {
            self.mutated()?;
            let mut todos = self.todos.lock().unwrap();
            Ok(todos
                .iter_mut()
                .filter(|t| t.id == id)
                .map(|t| {
                    t.title = input.title.clone();
                    t.description = input.description.clone();
                    t.completed = input.completed;
                    t.updated_at = Some(2);
                    t.clone()
                })
                .collect())
        }

        async fn delete(&self, id: i64) -> Result<(), ClientError> {
            self.mutated()?;
            self.todos.lock().unwrap().retain(|t| t.id != id);
            Ok(())
        }

        async fn delete_all(&self) -> Result<(), ClientError> {
            self.mutated()?;
            self.todos.lock().unwrap().clear();
            Ok(())
        }
    }

    async fn loaded(titles: &[&str]) -> TodoController<FakeApi> {
        let mut controller = TodoController::new(FakeApi::with_titles(titles));
        controller.load().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn load_replaces_collection() {
        let controller = loaded(&["a", "b"]).await;
        assert_eq!(controller.todos().len(), 2);
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_state() {
        let mut controller = loaded(&["a"]).await;
        controller.api().fail.store(true, Ordering::SeqCst);

        assert!(controller.load().await.is_err());
        assert_eq!(controller.todos().len(), 1);
        assert!(controller.last_error().is_some());
    }

    #[tokio::test]
    async fn submit_creates_then_reloads() {
        let mut controller = loaded(&[]).await;
        controller.begin_create();
        controller.form_mut().title = "Buy milk".to_string();
        controller.form_mut().description = "2%".to_string();

        controller.submit().await.unwrap();

        assert_eq!(controller.todos().len(), 1);
        assert_eq!(controller.todos()[0].title, "Buy milk");
        assert!(!controller.todos()[0].completed);
        assert!(!controller.is_form_open());
        assert_eq!(controller.form(), &FormState::default());
        assert_eq!(controller.api().list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn submit_while_editing_updates() {
        let mut controller = loaded(&["a", "b"]).await;
        controller.begin_edit(1).unwrap();
        assert_eq!(controller.form().title, "a");
        controller.form_mut().completed = true;

        controller.submit().await.unwrap();

        assert!(controller.todos()[0].completed);
        assert!(!controller.todos()[1].completed);
        assert_eq!(controller.todos().len(), 2);
        assert_eq!(controller.editing(), None);
    }

    #[tokio::test]
    async fn submit_rejects_blank_title_without_request() {
        let mut controller = loaded(&[]).await;
        controller.begin_create();
        controller.form_mut().title = "  ".to_string();

        let err = controller.submit().await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(controller.api().mutations.load(Ordering::SeqCst), 0);
        assert!(controller.is_form_open());
    }

    #[tokio::test]
    async fn failed_submit_leaves_form_open() {
        let mut controller = loaded(&[]).await;
        controller.begin_create();
        controller.form_mut().title = "keep me".to_string();
        controller.api().fail.store(true, Ordering::SeqCst);

        assert!(controller.submit().await.is_err());
        assert!(controller.is_form_open());
        assert_eq!(controller.form().title, "keep me");
    }

    #[tokio::test]
    async fn begin_edit_unknown_id_is_not_found() {
        let mut controller = loaded(&["a"]).await;
        assert!(matches!(
            controller.begin_edit(99),
            Err(ClientError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn delete_waits_for_confirmation() {
        let mut controller = loaded(&["a", "b"]).await;

        controller.request_delete(1).unwrap();
        assert_eq!(controller.pending(), PendingAction::DeleteOne(1));
        assert!(controller.prompt().unwrap().contains("\"a\""));
        assert_eq!(controller.api().mutations.load(Ordering::SeqCst), 0);

        let executed = controller.confirm().await.unwrap();
        assert_eq!(executed, PendingAction::DeleteOne(1));
        assert_eq!(controller.pending(), PendingAction::None);
        assert!(controller.prompt().is_none());
        let ids: Vec<i64> = controller.todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn cancel_discards_pending_action() {
        let mut controller = loaded(&["a"]).await;
        controller.request_delete_all();
        controller.cancel();

        assert_eq!(controller.pending(), PendingAction::None);
        assert_eq!(controller.confirm().await.unwrap(), PendingAction::None);
        assert_eq!(controller.todos().len(), 1);
        assert_eq!(controller.api().mutations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_all_on_empty_collection_stages_nothing() {
        let mut controller = loaded(&[]).await;
        assert_eq!(controller.request_delete_all(), StageOutcome::NothingToDelete);
        assert_eq!(controller.pending(), PendingAction::None);
    }

    #[tokio::test]
    async fn delete_all_prompt_names_count() {
        let mut controller = loaded(&["a", "b", "c"]).await;
        assert_eq!(controller.request_delete_all(), StageOutcome::Staged);
        assert!(controller.prompt().unwrap().contains("3 tasks"));

        controller.confirm().await.unwrap();
        assert!(controller.todos().is_empty());
    }

    #[tokio::test]
    async fn visible_and_stats_follow_filter_and_sort() {
        let mut controller = loaded(&["banana", "Apple", "cherry"]).await;
        controller.begin_edit(3).unwrap();
        controller.form_mut().completed = true;
        controller.submit().await.unwrap();

        controller.set_sort(SortOrder::Desc);
        let titles: Vec<&str> = controller.visible().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["cherry", "banana", "Apple"]);

        controller.set_filter(Filter::Incomplete);
        let titles: Vec<&str> = controller.visible().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["banana", "Apple"]);

        let stats = controller.stats();
        assert_eq!((stats.total, stats.completed, stats.incomplete), (3, 1, 2));
    }
}
