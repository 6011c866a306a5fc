pub mod user;

use std::future::IntoFuture;

use crate::request::{CancelSource, RequestError, RequestFuture};

/// An issued API call together with the handle that can abort it.
pub struct ApiCall<T> {
    pub request: RequestFuture<T>,
    pub source: CancelSource,
}

impl<T> ApiCall<T> {
    pub fn cancel(&self) {
        self.source.cancel();
    }

    pub fn into_parts(self) -> (RequestFuture<T>, CancelSource) {
        (self.request, self.source)
    }
}

impl<T> IntoFuture for ApiCall<T> {
    type Output = Result<T, RequestError>;
    type IntoFuture = RequestFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.request
    }
}
