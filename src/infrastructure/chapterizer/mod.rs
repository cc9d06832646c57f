mod catalog;
pub mod chapter_parser;
mod chapterizer_factory;
mod external_chapterizer;
mod mock_chapterizer;
pub mod srt;

pub use catalog::default_catalog;
pub use chapterizer_factory::{ChapterizerFactory, ChapterizerFactoryError};
pub use external_chapterizer::{ExternalChapterizer, chapter_labels};
pub use mock_chapterizer::MockChapterizer;
