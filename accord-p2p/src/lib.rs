pub mod http;
pub mod ports;

pub use http::HttpPeer;
pub use ports::PeerClient;
