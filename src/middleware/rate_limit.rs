use crate::utils::error::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;
use governor::{
    clock::{Clock, DefaultClock},
    middleware::StateInformationMiddleware,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use std::future::{ready, Ready};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

type KeyedLimiter =
    RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock, StateInformationMiddleware>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Rejected { retry_after: Duration },
}

/// Per-IP limiter: `max_requests` per `window`, replenished evenly across it.
pub struct ClientRateLimiter {
    max_requests: u32,
    limiter: KeyedLimiter,
}

impl ClientRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, AppError> {
        let burst = NonZeroU32::new(max_requests)
            .ok_or_else(|| AppError::Config("RATE_LIMIT_MAX must be at least 1".into()))?;
        let quota = Quota::with_period(window / max_requests)
            .ok_or_else(|| AppError::Config("RATE_LIMIT_WINDOW_SECS must be at least 1".into()))?
            .allow_burst(burst);

        Ok(Self {
            max_requests,
            limiter: RateLimiter::keyed(quota).with_middleware::<StateInformationMiddleware>(),
        })
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn check(&self, ip: IpAddr) -> Decision {
        match self.limiter.check_key(&ip) {
            Ok(state) => Decision::Allowed {
                remaining: state.remaining_burst_capacity(),
            },
            Err(not_until) => Decision::Rejected {
                retry_after: not_until.wait_time_from(self.limiter.clock().now()),
            },
        }
    }

    /// Drops clients whose allowance is full again.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Whole seconds to wait, rounded up and never zero.
fn retry_after_secs(wait: Duration) -> u64 {
    let millis = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
    millis.div_ceil(1000).max(1)
}

/// Middleware applying one shared `ClientRateLimiter` to every request.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<ClientRateLimiter>,
}

impl RateLimit {
    pub fn new(limiter: Arc<ClientRateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: S,
    limiter: Arc<ClientRateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Without a peer address there is nothing to key on.
        let ip = match req.peer_addr() {
            Some(addr) => addr.ip(),
            None => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
            }
        };

        let limit = self.limiter.max_requests();
        match self.limiter.check(ip) {
            Decision::Rejected { retry_after } => {
                log::warn!("🚫 Rate limit exceeded for {} on {}", ip, req.path());

                let response = HttpResponse::TooManyRequests()
                    .insert_header((RETRY_AFTER, retry_after_secs(retry_after).to_string()))
                    .insert_header((LIMIT_HEADER, limit.to_string()))
                    .insert_header((REMAINING_HEADER, "0"))
                    .json(serde_json::json!({
                        "message": "Too many requests, please try again later."
                    }));

                let res = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
            Decision::Allowed { remaining } => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(limit));
                    headers.insert(
                        HeaderName::from_static(REMAINING_HEADER),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}
