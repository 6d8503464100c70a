pub mod mock;
pub mod remote;
pub mod text;

pub use mock::MockEngine;
pub use remote::RemoteEngine;
pub use text::transliterate_text;
