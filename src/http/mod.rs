pub(crate) mod request;
pub(crate) mod response;

pub use request::HttpRequest;
pub use response::HttpResponse;
