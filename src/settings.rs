//! General settings and the settings cache.
//!
//! Settings (site name, contact details, social links) are read on nearly
//! every page, so consumers go through a [`SettingsCache`] instead of
//! re-reading `settings/general.yml` each time. The cache is an explicit
//! value owned by whoever builds the pages; there is no global.
//!
//! ```text
//! get()          ─► cached? ──yes──► clone
//!                      │
//!                      no ──► loader.load_settings() ──► store ──► clone
//! clear()        ─► empty the slot
//! get_uncached() ─► loader.load_settings()   (slot untouched)
//! ```
//!
//! Fallback results are cached like CMS results. A broken settings file is
//! reported once per cache lifetime, not once per page.

use crate::assemble::{Assembled, ContentStore};
use crate::fallback;
use crate::fields::RawFields;
use crate::types::{ContentKind, GeneralSettings, SocialLink};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Anything that can produce assembled settings.
pub trait SettingsLoader {
    fn load_settings(&self) -> Assembled<GeneralSettings>;
}

impl SettingsLoader for ContentStore {
    fn load_settings(&self) -> Assembled<GeneralSettings> {
        self.settings()
    }
}

impl<L: SettingsLoader + ?Sized> SettingsLoader for &L {
    fn load_settings(&self) -> Assembled<GeneralSettings> {
        (**self).load_settings()
    }
}

impl ContentStore {
    /// Load general settings, bypassing any cache.
    pub fn settings(&self) -> Assembled<GeneralSettings> {
        self.load_single(ContentKind::Settings, settings_from, fallback::settings)
    }
}

fn settings_from(raw: &RawFields) -> GeneralSettings {
    let contact = raw.object(&["contact"]).unwrap_or_default();
    let social = raw
        .objects(&["social", "socialLinks", "social_links"])
        .unwrap_or_default()
        .iter()
        .filter_map(|link| {
            Some(SocialLink {
                platform: link.text(&["platform", "name"])?,
                url: link.text(&["url", "href"])?,
            })
        })
        .collect();
    let site_name = raw.text_or(&["siteName", "site_name", "title"], "");
    let default_meta_description = raw.text_or(
        &["defaultMetaDescription", "default_meta_description", "description"],
        "",
    );

    GeneralSettings {
        tagline: raw.text_or(&["tagline"], ""),
        contact_email: raw
            .text(&["contactEmail", "contact_email", "email"])
            .or_else(|| contact.text(&["email"]))
            .unwrap_or_default(),
        phone: raw
            .text(&["phone"])
            .or_else(|| contact.text(&["phone"]))
            .unwrap_or_default(),
        address: raw
            .text(&["address"])
            .or_else(|| contact.text(&["address"]))
            .unwrap_or_default(),
        social,
        footer_text: raw
            .text(&["footerText", "footer_text"])
            .unwrap_or_else(|| footer_for(&site_name)),
        default_meta_description,
        site_name,
    }
}

fn footer_for(site_name: &str) -> String {
    if site_name.is_empty() {
        String::new()
    } else {
        format!("© {site_name}. All rights reserved.")
    }
}

/// Memoizes one [`SettingsLoader`] result until cleared.
///
/// Safe to share between threads; concurrent first calls may both load,
/// and the last store wins. Both results are equal, so callers cannot tell.
pub struct SettingsCache<L> {
    loader: L,
    slot: Mutex<Option<Assembled<GeneralSettings>>>,
}

impl<L: SettingsLoader> SettingsCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slot: Mutex::new(None),
        }
    }

    /// Cached settings, loading them on first use.
    pub fn get(&self) -> Assembled<GeneralSettings> {
        if let Some(cached) = self.lock().as_ref() {
            debug!("settings cache hit");
            return cached.clone();
        }
        debug!("settings cache miss");
        let loaded = self.loader.load_settings();
        *self.lock() = Some(loaded.clone());
        loaded
    }

    /// Drop the cached value; the next `get` reloads.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Load fresh settings without reading or writing the cache.
    pub fn get_uncached(&self) -> Assembled<GeneralSettings> {
        self.loader.load_settings()
    }

    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Assembled<GeneralSettings>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
