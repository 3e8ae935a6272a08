//! Terminal rendering.
//!
//! Every writer takes a generic [`std::io::Write`] and the [`Messages`] for
//! the current language, so output can be captured in tests.

mod card;
mod comparison;
mod messages;

pub use card::{
    BOARD_PREVIEW_LEN, SOURCES_PREVIEW_LEN, TECH_STACK_PREVIEW_LEN, write_card, write_history,
    write_result_list,
};
pub use comparison::{BAR_WIDTH, write_comparison};
pub use messages::Messages;
