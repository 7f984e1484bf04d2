//! Pipeline observation hook.
//!
//! The calculator reports notable steps as [`PipelineEvent`]s to an injected
//! [`PipelineObserver`]. [`NoopObserver`] is the default; [`TracingObserver`]
//! forwards events to `tracing`.

use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A notable step in one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PipelineEvent {
    /// The birth date did not parse; today's date was used.
    DateSubstituted { input: String, substituted: NaiveDate },
    /// The birth time was normalized.
    Normalized {
        original: NaiveDateTime,
        adjusted: NaiveDateTime,
        timezone: String,
        total_seconds: i64,
    },
    /// The selected lunar bridge failed and the stub answered instead.
    BridgeFallback {
        bridge: &'static str,
        operation: &'static str,
        error: String,
    },
    /// No lunar information at all; civil-month fallback in effect.
    LunarUnavailable { error: String },
    /// Four raw pillars before corrections.
    PillarsDerived { labels: [String; 4] },
    /// A boundary override replaced a pillar.
    BoundaryOverride {
        rule: &'static str,
        position: &'static str,
        before: String,
        after: String,
    },
    /// A combination transmuted stems or enhanced an element.
    CombinationApplied {
        kind: &'static str,
        left: usize,
        element: &'static str,
    },
    ArchetypeResolved {
        archetype: &'static str,
        strength: &'static str,
        score: f64,
    },
    /// The pipeline failed; a fallback chart was returned.
    FallbackChart { error: String },
}

impl PipelineEvent {
    /// Whether the event signals degraded output.
    pub fn is_degradation(&self) -> bool {
        matches!(
            self,
            Self::DateSubstituted { .. }
                | Self::BridgeFallback { .. }
                | Self::LunarUnavailable { .. }
                | Self::FallbackChart { .. }
        )
    }
}

/// Receives pipeline events. Implementations must not panic.
pub trait PipelineObserver: Send + Sync + std::fmt::Debug {
    fn on_event(&self, event: &PipelineEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent) {}
}

/// Forwards events to `tracing`: degradations at `warn`, the rest at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::DateSubstituted { input, substituted } => {
                tracing::warn!(%input, %substituted, "unparseable birth date, using today");
            }
            PipelineEvent::BridgeFallback {
                bridge,
                operation,
                error,
            } => {
                tracing::warn!(bridge, operation, %error, "lunar bridge failed, using stub");
            }
            PipelineEvent::LunarUnavailable { error } => {
                tracing::warn!(%error, "no lunar data, using civil months");
            }
            PipelineEvent::FallbackChart { error } => {
                tracing::warn!(%error, "calculation failed, returning fallback chart");
            }
            PipelineEvent::Normalized {
                original,
                adjusted,
                timezone,
                total_seconds,
            } => {
                tracing::debug!(%original, %adjusted, %timezone, total_seconds, "normalized");
            }
            PipelineEvent::PillarsDerived { labels } => {
                tracing::debug!(pillars = ?labels, "pillars derived");
            }
            PipelineEvent::BoundaryOverride {
                rule,
                position,
                before,
                after,
            } => {
                tracing::debug!(rule, position, %before, %after, "boundary override");
            }
            PipelineEvent::CombinationApplied {
                kind,
                left,
                element,
            } => {
                tracing::debug!(kind, left, element, "combination applied");
            }
            PipelineEvent::ArchetypeResolved {
                archetype,
                strength,
                score,
            } => {
                tracing::debug!(archetype, strength, score, "archetype resolved");
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order() {
        let obs = RecordingObserver::default();
        obs.on_event(&PipelineEvent::LunarUnavailable { error: "a".into() });
        obs.on_event(&PipelineEvent::FallbackChart { error: "b".into() });
        let events = obs.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], PipelineEvent::FallbackChart { .. }));
    }

    #[test]
    fn degradations() {
        assert!(PipelineEvent::FallbackChart { error: String::new() }.is_degradation());
        assert!(
            !PipelineEvent::PillarsDerived {
                labels: Default::default()
            }
            .is_degradation()
        );
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_string(&PipelineEvent::LunarUnavailable {
            error: "x".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"lunarUnavailable","error":"x"}"#);
    }
}
