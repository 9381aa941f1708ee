use crate::config::RateLimitConfig;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use ipnetwork::IpNetwork;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::net::{IpAddr, SocketAddr};
use tower_governor::GovernorError;
use tower_governor::key_extractor::KeyExtractor;

/// The two limits the public router applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    /// Reads and the admin API.
    Standard,
    /// The anonymous contact form.
    Contact,
}

impl RateTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Contact => "contact",
        }
    }
}

/// Replenish interval and burst size for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub interval_ns: u64,
    pub burst: u32,
}

impl Quota {
    fn per_second(per_second: u32, burst: u32) -> Self {
        Self { interval_ns: 1_000_000_000 / u64::from(per_second.max(1)), burst: burst.max(1) }
    }
}

/// Networks whose `X-Forwarded-For` we believe.
#[derive(Debug, Clone, Default)]
pub struct TrustedProxies(Vec<IpNetwork>);

impl TrustedProxies {
    #[must_use]
    pub const fn new(networks: Vec<IpNetwork>) -> Self {
        Self(networks)
    }

    fn contains(&self, ip: IpAddr) -> bool {
        self.0.iter().any(|net| net.contains(ip))
    }

    /// Resolves who is actually talking to us.
    ///
    /// A peer outside the trusted networks is the client. Otherwise the
    /// forwarded chain is read from the nearest hop outward and the first
    /// untrusted address wins, falling back to the peer.
    #[must_use]
    pub fn client_ip(&self, peer: IpAddr, forwarded_for: Option<&str>) -> IpAddr {
        if !self.contains(peer) {
            return peer;
        }

        forwarded_for
            .into_iter()
            .flat_map(|chain| chain.rsplit(','))
            .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
            .find(|hop| !self.contains(*hop))
            .unwrap_or(peer)
    }
}

/// Governor key: one bucket per resolved client address.
#[derive(Debug, Clone)]
pub struct ClientIpKey {
    proxies: TrustedProxies,
}

impl KeyExtractor for ClientIpKey {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .ok_or(GovernorError::UnableToExtractKey)?;
        let forwarded_for = req.headers().get("x-forwarded-for").and_then(|v| v.to_str().ok());

        Ok(self.proxies.client_ip(peer, forwarded_for))
    }
}

/// Per-tier quotas, the shared client key and the decision counter.
#[derive(Clone, Debug)]
pub struct RateLimitService {
    key: ClientIpKey,
    standard: Quota,
    contact: Quota,
    decisions_total: Counter<u64>,
}

impl RateLimitService {
    #[must_use]
    pub fn new(trusted_proxies: Vec<IpNetwork>, limits: &RateLimitConfig) -> Self {
        let decisions_total = global::meter("portfolio-server")
            .u64_counter("portfolio_rate_limit_decisions_total")
            .with_description("Rate limit decisions by tier (allowed/throttled)")
            .build();

        Self {
            key: ClientIpKey { proxies: TrustedProxies::new(trusted_proxies) },
            standard: Quota::per_second(limits.per_second, limits.burst),
            contact: Quota::per_second(limits.contact_per_second, limits.contact_burst),
            decisions_total,
        }
    }

    #[must_use]
    pub fn key(&self) -> ClientIpKey {
        self.key.clone()
    }

    #[must_use]
    pub const fn quota(&self, tier: RateTier) -> Quota {
        match tier {
            RateTier::Standard => self.standard,
            RateTier::Contact => self.contact,
        }
    }

    pub fn record(&self, tier: RateTier, status: StatusCode, retry_after: Option<&str>) {
        let decision = if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(tier = tier.as_str(), retry_after_secs = retry_after.unwrap_or("?"), "Rate limit exceeded");
            "throttled"
        } else {
            "allowed"
        };

        self.decisions_total.add(1, &[KeyValue::new("tier", tier.as_str()), KeyValue::new("decision", decision)]);
    }
}
