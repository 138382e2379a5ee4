pub mod login;
pub mod seed_demo_list;
pub mod signup;
pub mod toggle_item_complete;
pub mod update_item;
