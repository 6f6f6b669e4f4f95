use crate::ui::books::intent::BookIntent;
use crate::ui::books::state::BookCollection;
use crate::ui::mvi::Reducer;

pub struct BooksReducer;

impl Reducer for BooksReducer {
    type State = BookCollection;
    type Intent = BookIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            BookIntent::Init(books) => BookCollection::new(books),
            BookIntent::Add(book) => {
                let mut books = state.into_books();
                books.insert(0, book);
                BookCollection::new(books)
            }
            BookIntent::Remove(id) => {
                let mut books = state.into_books();
                books.retain(|book| book.id != id);
                BookCollection::new(books)
            }
            BookIntent::Replace(book) => {
                let mut books = state.into_books();
                books.retain(|existing| existing.id != book.id);
                books.insert(0, book);
                BookCollection::new(books)
            }
        }
    }
}
