//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::remote::FirebaseStore;
use crate::session::{BrowserStorage, Session};

/// Top-level screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Summary,
    AddTask,
    Board,
    Contacts,
    SignUp,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Summary => "Summary",
            Page::AddTask => "Add Task",
            Page::Board => "Board",
            Page::Contacts => "Contacts",
            Page::SignUp => "Sign up",
        }
    }
}

/// Banner shown after a failed write
#[derive(Clone)]
pub struct Notice {
    pub message: String,
    /// Repeats the failed write
    pub retry: Option<Callback<()>>,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload tasks and people - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks and people - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current screen - read
    pub page: ReadSignal<Page>,
    /// Current screen - write
    set_page: WriteSignal<Page>,
    /// Signed-in user - read
    pub session: ReadSignal<Session>,
    /// Signed-in user - write
    set_session: WriteSignal<Session>,
    /// Failure banner - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Failure banner - write
    set_notice: WriteSignal<Option<Notice>>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
        session: (ReadSignal<Session>, WriteSignal<Session>),
        notice: (ReadSignal<Option<Notice>>, WriteSignal<Option<Notice>>),
        config: AppConfig,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            page: page.0,
            set_page: page.1,
            session: session.0,
            set_session: session.1,
            notice: notice.0,
            set_notice: notice.1,
            config: StoredValue::new(config),
        }
    }

    /// Trigger a reload of tasks and people
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn navigate(&self, page: Page) {
        self.set_page.set(page);
    }

    /// Client for the configured document store
    pub fn store(&self) -> FirebaseStore {
        FirebaseStore::new(self.config.with_value(|c| c.store_url.clone()))
    }

    pub fn storage(&self) -> BrowserStorage {
        BrowserStorage
    }

    pub fn set_session(&self, session: Session) {
        self.set_session.set(session);
    }

    /// Show a failure banner, optionally with a retry action
    pub fn notify(&self, message: impl Into<String>, retry: Option<Callback<()>>) {
        self.set_notice.set(Some(Notice { message: message.into(), retry }));
    }

    pub fn clear_notice(&self) {
        self.set_notice.set(None);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
