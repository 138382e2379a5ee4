pub mod error;
pub mod services;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::TodoError;
pub use services::{todo_service::TodoService, user_service::UserService};
pub use use_cases::{
    login::{LoginError, LoginRequest, LoginUseCase},
    seed_demo_list::SeedDemoListUseCase,
    signup::{SignupError, SignupRequest, SignupUseCase},
    toggle_item_complete::ToggleItemCompleteUseCase,
    update_item::UpdateItemUseCase,
};
