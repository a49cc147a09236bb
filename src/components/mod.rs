//! UI Components
//!
//! Leptos components for the board, the task forms, contacts and the
//! surrounding chrome.

mod assignee_picker;
mod avatar;
mod board_column;
mod board_view;
mod contact_form;
mod contacts_page;
mod delete_confirm_button;
mod header_bar;
mod move_menu;
mod notice_banner;
mod side_nav;
mod sign_up;
mod subtask_editor;
mod summary_page;
mod task_card;
mod task_form;
mod task_overlay;

pub use assignee_picker::AssigneePicker;
pub use avatar::{Avatar, OverflowAvatar};
pub use board_column::BoardColumn;
pub use board_view::BoardView;
pub use contact_form::ContactForm;
pub use contacts_page::ContactsPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use header_bar::HeaderBar;
pub use move_menu::MoveMenu;
pub use notice_banner::NoticeBanner;
pub use side_nav::SideNav;
pub use sign_up::SignUp;
pub use subtask_editor::SubtaskEditor;
pub use summary_page::SummaryPage;
pub use task_card::TaskCard;
pub use task_form::{FormMode, TaskForm};
pub use task_overlay::TaskOverlay;
