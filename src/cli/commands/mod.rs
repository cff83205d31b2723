mod add;
mod history;
mod list;
mod sync;

pub use add::cmd_add_case;
pub use history::cmd_history;
pub use list::cmd_list_cases;
pub use sync::cmd_sync;
