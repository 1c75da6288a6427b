//! Repositories for database operations

pub mod choice;
pub mod menu;
pub mod restaurant;

pub use choice::ChoiceRepository;
pub use menu::MenuRepository;
pub use restaurant::RestaurantRepository;
