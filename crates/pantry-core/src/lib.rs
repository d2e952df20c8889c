pub mod error;
pub mod flyer;
pub mod fridge;
pub mod lobby;
pub mod recipe;

pub use error::PantryError;
pub use flyer::{FlyerItem, Groceries};
pub use fridge::FridgeItem;
pub use lobby::{DietaryInfo, Lobby, LobbyEntry, LobbySummary};
pub use recipe::RecipeSearch;
