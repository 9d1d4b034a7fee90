mod item;
mod user;

pub use item::{Item, ItemChanges, NewItem};
pub use user::{NewUser, User, UserChanges};
