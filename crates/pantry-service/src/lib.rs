mod kitchen;
mod spoonacular;
mod traits;

pub use kitchen::KitchenService;
pub use spoonacular::{SpoonacularClient, DEFAULT_BASE_URL};
pub use traits::{RecipeProvider, ServiceError};
