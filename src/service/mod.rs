pub mod trivia;

pub use trivia::TriviaService;
