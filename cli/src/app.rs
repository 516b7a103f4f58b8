// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use jiff::Zoned;
use jiff::civil::DateTime;
use timetab_catalog::{Catalog, HttpCatalog};
use timetab_core::{EventBook, EventRecord};

use crate::config::Config;
use crate::store::{load_events, save_events};

/// The state a command runs against: configuration, the committed events and
/// the clock.
#[derive(Debug)]
pub struct App {
    config: Config,
    book: EventBook,
    data_path: Option<PathBuf>,
    now: DateTime,
    dirty: bool,
}

impl App {
    /// Loads the event store named by the configuration.
    pub async fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        let events = match &config.core.data_path {
            Some(path) => load_events(path).await?,
            None => {
                tracing::warn!("no data path configured, events will not be saved");
                Vec::new()
            }
        };
        Ok(Self::with_events(config, events))
    }

    /// Builds an app over in-memory events.
    pub fn with_events(config: Config, events: Vec<EventRecord>) -> Self {
        let book = EventBook::with_config(events, &config.core);
        Self {
            data_path: config.core.data_path.clone(),
            config,
            book,
            now: Zoned::now().datetime(),
            dirty: false,
        }
    }

    /// Pins the clock, e.g. for reminders at a given time.
    pub fn with_now(mut self, now: DateTime) -> Self {
        self.now = now;
        self
    }

    pub fn now(&self) -> DateTime {
        self.now
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn book(&self) -> &EventBook {
        &self.book
    }

    /// Mutable access to the events; the store is rewritten on close.
    pub fn book_mut(&mut self) -> &mut EventBook {
        self.dirty = true;
        &mut self.book
    }

    /// The configured lecture catalog.
    pub fn catalog(&self) -> Result<Catalog<HttpCatalog>, Box<dyn Error>> {
        let config = self
            .config
            .catalog
            .clone()
            .ok_or("No catalog configured, add a [catalog] table to the config")?;
        Ok(Catalog::new(HttpCatalog::new(config)?))
    }

    /// Persists pending changes.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        match (&self.data_path, self.dirty) {
            (Some(path), true) => save_events(path, self.book.events()).await,
            _ => Ok(()),
        }
    }
}
