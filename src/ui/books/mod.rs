mod intent;
mod reducer;
mod state;

pub use intent::BookIntent;
pub use reducer::BooksReducer;
pub use state::BookCollection;
