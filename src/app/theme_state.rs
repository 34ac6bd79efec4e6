//! Session display preference (dark/light)
//!
//! The ambient platform preference comes in through [`AmbientPreference`],
//! so tests can drive it with a [`SystemThemeSignal`] instead of the OS.
//! A manual toggle wins until the ambient preference changes again.
//! Nothing here is persisted.

use crate::types::ThemeMode;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Source of the platform's dark/light preference
pub trait AmbientPreference {
    /// `None` until the platform has reported a preference
    fn current(&self) -> Option<ThemeMode>;
    fn subscribe(&self) -> PreferenceSubscription;
}

/// Live feed of ambient changes. Dropping it unsubscribes.
pub struct PreferenceSubscription {
    rx: watch::Receiver<Option<ThemeMode>>,
}

impl PreferenceSubscription {
    /// Latest preference if it changed since the last call
    fn take_change(&mut self) -> Option<ThemeMode> {
        match self.rx.has_changed() {
            Ok(true) => *self.rx.borrow_and_update(),
            _ => None,
        }
    }
}

/// Broadcast cell for the ambient preference, fed from the UI each frame
#[derive(Clone)]
pub struct SystemThemeSignal {
    tx: Arc<watch::Sender<Option<ThemeMode>>>,
}

impl Default for SystemThemeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemThemeSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Record the platform preference. Subscribers are only notified when it
    /// actually differs from the last published value.
    pub fn publish(&self, mode: ThemeMode) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == Some(mode) {
                false
            } else {
                *current = Some(mode);
                true
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl AmbientPreference for SystemThemeSignal {
    fn current(&self) -> Option<ThemeMode> {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> PreferenceSubscription {
        PreferenceSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

pub struct ThemeSession {
    subscription: Option<PreferenceSubscription>,
    mode: Option<ThemeMode>,
    overridden: bool,
}

impl ThemeSession {
    /// Read the ambient preference once and keep listening for changes
    pub fn attach(provider: &impl AmbientPreference) -> Self {
        // Subscribe before reading so a change in between is not lost
        let subscription = provider.subscribe();
        let mode = provider.current();
        debug!(?mode, "Theme session attached");
        Self {
            subscription: Some(subscription),
            mode,
            overridden: false,
        }
    }

    /// Apply pending ambient changes. Returns true if the mode changed.
    pub fn poll(&mut self) -> bool {
        let Some(next) = self.subscription.as_mut().and_then(|s| s.take_change()) else {
            return false;
        };
        self.overridden = false;
        if self.mode == Some(next) {
            return false;
        }
        debug!(mode = ?next, "Ambient theme changed");
        self.mode = Some(next);
        true
    }

    /// Manual override; ignored until the ambient preference is known
    pub fn toggle(&mut self) {
        if let Some(mode) = self.mode {
            self.mode = Some(mode.toggled());
            self.overridden = true;
        }
    }

    pub fn mode(&self) -> Option<ThemeMode> {
        self.mode
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// Stop following the ambient preference
    pub fn detach(&mut self) {
        self.subscription = None;
    }
}
