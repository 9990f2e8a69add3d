pub mod collection;
pub mod detail;

pub use collection::GreetingCollection;
pub use detail::GreetingDetail;
