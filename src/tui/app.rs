use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::domain::{NewPost, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    UserId,
    Title,
    Body,
}

impl AddField {
    pub fn next(self) -> Self {
        match self {
            AddField::UserId => AddField::Title,
            AddField::Title => AddField::Body,
            AddField::Body => AddField::UserId,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            AddField::UserId => AddField::Body,
            AddField::Title => AddField::UserId,
            AddField::Body => AddField::Title,
        }
    }
}

/// Input state of the modal add dialog.
#[derive(Debug, Clone)]
pub struct AddDialog {
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub field: AddField,
}

impl AddDialog {
    pub fn new() -> Self {
        Self {
            user_id: String::new(),
            title: String::new(),
            body: String::new(),
            field: AddField::UserId,
        }
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.field {
            AddField::UserId => &mut self.user_id,
            AddField::Title => &mut self.title,
            AddField::Body => &mut self.body,
        }
    }

    /// Validate the collected fields into a post ready for insertion.
    pub fn to_new_post(&self) -> std::result::Result<NewPost, String> {
        let user_id = self
            .user_id
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("User ID must be a number, got '{}'", self.user_id))?;

        Ok(NewPost {
            user_id,
            title: self.title.clone(),
            body: self.body.clone(),
        })
    }
}

impl Default for AddDialog {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TuiApp {
    pub posts: Vec<Post>,
    pub filter: String,
    pub selected: usize,
    pub mode: Mode,
    pub dialog: AddDialog,
    /// Gauge position while a manual download is underway or held.
    pub progress: Option<u16>,
    /// When to clear the gauge back to idle after a finished download.
    pub progress_reset_at: Option<Instant>,
    pub status_message: Option<String>,
    pub is_downloading: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            filter: String::new(),
            selected: 0,
            mode: Mode::Normal,
            dialog: AddDialog::new(),
            progress: None,
            progress_reset_at: None,
            status_message: None,
            is_downloading: false,
            last_synced_at: None,
            should_quit: false,
        }
    }

    /// Posts visible under the current filter, in store order.
    pub fn filtered(&self) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.matches_filter(&self.filter))
            .collect()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.filtered().get(self.selected).copied()
    }

    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.filtered().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn open_add_dialog(&mut self) {
        self.dialog = AddDialog::new();
        self.mode = Mode::Add;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the gauge once its hold period has elapsed.
    pub fn maybe_reset_progress(&mut self, now: Instant) {
        if let Some(reset_at) = self.progress_reset_at {
            if now >= reset_at {
                self.progress = None;
                self.progress_reset_at = None;
            }
        }
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
