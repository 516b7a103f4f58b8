// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgAction, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use timetab_catalog::{Catalog, CatalogProvider};
use timetab_core::{LectureRecord, SearchOptions, SearchSession};

use crate::app::App;
use crate::arg::{CommonArgs, SearchArgs};
use crate::lecture_formatter::LectureFormatter;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdLectureSearch {
    pub options: SearchOptions,
    pub resources: Vec<String>,
    pub page: usize,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdLectureSearch {
    pub const NAME: &str = "search";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Search the lecture catalog")
            .arg(SearchArgs::query())
            .arg(SearchArgs::grade())
            .arg(SearchArgs::day())
            .arg(SearchArgs::time())
            .arg(SearchArgs::major())
            .arg(SearchArgs::credits())
            .arg(
                arg!(-r --resource <KEY> "Catalog resource to search, defaults to all")
                    .action(ArgAction::Append),
            )
            .arg(
                arg!(-p --page <PAGE> "Show results up to this page")
                    .value_parser(value_parser!(u64).range(1..))
                    .default_value("1"),
            )
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            options: SearchArgs::get_options(matches),
            resources: matches
                .get_many::<String>("resource")
                .map(|keys| keys.cloned().collect())
                .unwrap_or_default(),
            page: matches
                .get_one::<u64>("page")
                .and_then(|&p| usize::try_from(p).ok())
                .unwrap_or(1),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "searching lectures...");
        let catalog = app.catalog()?;
        let keys = if self.resources.is_empty() {
            catalog
                .provider()
                .config()
                .keys()
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            self.resources.clone()
        };
        if keys.is_empty() {
            return Err("No catalog resources configured".into());
        }

        let page_size = app.config().core.page_size;
        self.search(&catalog, &keys, page_size).await
    }

    /// Fetches the resources and prints the matching lectures up to the
    /// requested page.
    pub async fn search<P: CatalogProvider + 'static>(
        &self,
        catalog: &Catalog<P>,
        keys: &[String],
        page_size: usize,
    ) -> Result<(), Box<dyn Error>> {
        let lectures = catalog.all_lectures(keys).await?;
        let session = self.session(lectures, page_size);

        let visible: Vec<&LectureRecord> = session.visible();
        let formatter = LectureFormatter::new(self.verbose).with_output_format(self.output_format);
        match self.output_format {
            OutputFormat::Table if visible.is_empty() => {
                println!("{}", "No lectures found".italic());
            }
            OutputFormat::Table => {
                println!("{}", formatter.format(&visible));
                let footer = format!(
                    "Page {}/{}, {} lectures",
                    session.page(),
                    session.last_page(),
                    session.len()
                );
                println!("{}", footer.italic());
            }
            OutputFormat::Json => println!("{}", formatter.format(&visible)),
        }
        Ok(())
    }

    fn session(&self, lectures: Vec<LectureRecord>, page_size: usize) -> SearchSession<LectureRecord> {
        let mut session = SearchSession::new(lectures, page_size);
        session.set_options(self.options.clone());
        while session.page() < self.page && session.page() < session.last_page() {
            session.next_page();
        }
        session
    }
}
