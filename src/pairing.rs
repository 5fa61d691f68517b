//! Device-pairing protocol: mint a short-lived token/PIN pair, consume it
//! exactly once to register a mobile device.
//!
//! State machine: `Idle → Issued(token, pin) → Consumed`, with expiry
//! determined locally from the issue instant. Transitions commit only after
//! the underlying source call completes, so a cancelled or failed
//! registration leaves the pairing usable.
//!
//! The backend's exact validity window is not documented; it is taken from
//! configuration and should be confirmed against a live integration.

use std::time::{Duration, Instant};

use crate::error::{ClientError, PairingError};
use crate::models::{Device, SchoolContext};
use crate::normalize;
use crate::source::RawDataSource;

/// A pairing token issued by the backend, waiting to be consumed.
#[derive(Debug, Clone)]
pub struct PairingState {
    pub token: String,
    pub symbol: String,
    pub pin: String,
    pub issued_at: Instant,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Issued(PairingState),
    Consumed,
}

#[derive(Debug)]
pub struct DevicePairing {
    phase: Phase,
    validity: Duration,
}

impl DevicePairing {
    pub fn new(validity: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            validity,
        }
    }

    /// The issued-and-unexpired pairing, if any.
    pub fn issued(&self) -> Option<&PairingState> {
        match &self.phase {
            Phase::Issued(state) if state.issued_at.elapsed() <= self.validity => Some(state),
            _ => None,
        }
    }

    /// Mint a token/PIN pair tied to the current identity. A new request
    /// supersedes any previously issued (or consumed) pairing.
    pub async fn request<S>(
        &mut self,
        source: &S,
        school: &SchoolContext,
    ) -> Result<PairingState, ClientError>
    where
        S: RawDataSource + ?Sized,
    {
        let raw = source.request_token(school).await?;
        let state = PairingState {
            token: raw.token,
            symbol: raw.symbol,
            pin: raw.pin,
            issued_at: Instant::now(),
        };
        self.phase = Phase::Issued(state.clone());
        Ok(state)
    }

    /// Consume the issued pairing to register a device.
    ///
    /// Fails locally, without a network round-trip, when no pairing is
    /// issued, when the token was already consumed, or when the validity
    /// window has passed. A source failure leaves the pairing issued.
    pub async fn register<S>(
        &mut self,
        source: &S,
        school: &SchoolContext,
        device_name: &str,
    ) -> Result<Device, ClientError>
    where
        S: RawDataSource + ?Sized,
    {
        let state = match &self.phase {
            Phase::Idle => return Err(PairingError::NotIssued.into()),
            Phase::Consumed => return Err(PairingError::AlreadyConsumed.into()),
            Phase::Issued(state) => {
                if state.issued_at.elapsed() > self.validity {
                    return Err(PairingError::Expired.into());
                }
                state.clone()
            }
        };
        let raw = source
            .register_device(school, &state.token, &state.pin, device_name)
            .await?;
        let device = normalize::device(raw)?;
        self.phase = Phase::Consumed;
        Ok(device)
    }
}
