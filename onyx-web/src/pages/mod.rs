mod decision;
mod error;
mod library;
pub mod login;
mod new_decision;
pub mod payment;
mod workspace;

pub use decision::DecisionPage;
pub use error::ErrorPage;
pub use library::LibraryPage;
pub use login::LoginPage;
pub use new_decision::NewDecisionPage;
pub use payment::PaymentPage;
pub use workspace::WorkspacePage;
