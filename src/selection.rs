/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Album menu paging, with no I/O in it.

use std::ops::Range;

/// One line of user input at the album menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Album number as listed, starting at 1
    Select(usize),
    Next,
    Previous,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "q" => Self::Quit,
            "n" => Self::Next,
            "p" => Self::Previous,
            s if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => s
                .parse()
                .map(Self::Select)
                .unwrap_or(Self::Invalid(input.clone())),
            _ => Self::Invalid(input.clone()),
        }
    }
}

/// Yes/no answer to "download another album?". Anything but `y` is no.
pub fn parse_confirm(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The page changed; show it
    Redraw,
    /// Already on the last page, nothing changed
    LastPage,
    /// Already on the first page, nothing changed
    FirstPage,
    /// Download the album at this zero based index
    Download(usize),
    OutOfRange(usize),
    Invalid,
    Quit,
}

/// Which slice of the album list is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPager {
    total: usize,
    page_size: usize,
    page: usize,
}

impl AlbumPager {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Zero based index of the current page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Indexes of the albums on the current page
    pub fn visible(&self) -> Range<usize> {
        let start = (self.page * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn is_last_page(&self) -> bool {
        (self.page + 1) * self.page_size >= self.total
    }

    /// Jumps straight to a page. Pages past the end are refused.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < self.page_count().max(1) {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, command: &Command) -> Effect {
        match command {
            Command::Quit => Effect::Quit,
            Command::Next => {
                if self.is_last_page() {
                    Effect::LastPage
                } else {
                    self.page += 1;
                    Effect::Redraw
                }
            }
            Command::Previous => {
                if self.page == 0 {
                    Effect::FirstPage
                } else {
                    self.page -= 1;
                    Effect::Redraw
                }
            }
            Command::Select(number) => {
                if *number < 1 || *number > self.total {
                    Effect::OutOfRange(*number)
                } else {
                    Effect::Download(number - 1)
                }
            }
            Command::Invalid(_) => Effect::Invalid,
        }
    }
}
