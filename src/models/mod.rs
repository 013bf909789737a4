pub mod todo;

pub use todo::ToDoRecord;
