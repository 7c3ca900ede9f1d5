//! # TUI Components
//!
//! All UI pieces of the recommendation view.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created fresh each frame from borrowed data:
//! - `TitleBar`: backend location and status
//! - `SearchBox`: the movie title input
//! - `AlertModal`: blocking popup
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SuggestionList`: type-ahead dropdown; its highlight persists in
//!   `SuggestionListState` between frames
//! - `RecommendationList`: spinner, hint, or scrollable result cards; the
//!   scroll offset persists in `RecommendationListState`
//!
//! Components receive external data as props, never by reaching into
//! `App` themselves:
//!
//! ```rust,ignore
//! TitleBar::new(backend_name, &app.status_message, app.is_loading()).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs                  (this file)
//! ├── title_bar.rs
//! ├── search_box.rs
//! ├── suggestion_list.rs
//! ├── recommendation_list.rs
//! └── alert.rs
//! ```

pub mod alert;
pub mod recommendation_list;
pub mod search_box;
pub mod suggestion_list;
mod title_bar;

pub use alert::AlertModal;
pub use recommendation_list::{RecommendationList, RecommendationListState};
pub use search_box::SearchBox;
pub use suggestion_list::{SuggestionEvent, SuggestionList, SuggestionListState};
pub use title_bar::TitleBar;
