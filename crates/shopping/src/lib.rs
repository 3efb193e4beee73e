mod aggregation;
mod collector;
mod normalize;
mod service;

pub use aggregation::{ShoppingItem, ShoppingListBuilder, build};
pub use collector::{collect_for_plan, collect_for_range};
pub use normalize::{merge_key, normalize};
pub use service::ShoppingList;
