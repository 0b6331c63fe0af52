use crate::domain::services::models::service::Service;
use crate::i18n::Translations;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub class_name: String,
}

impl ButtonView {
    pub fn deploy(translations: &Translations, class_name: &str) -> Self {
        Self {
            label: format!("{} {}", translations.t("add"), translations.t("service")),
            class_name: format!("{class_name} button"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
}

impl From<&Service> for RowView {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.to_string(),
            name: service.display_name.clone(),
            image: service.container_image.clone(),
            status: service.status.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl RowView {
    fn cells(&self) -> [&str; 4] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.image.as_str(),
            self.status.as_str(),
        ]
    }
}

/// Everything the services page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub button: ButtonView,
    pub headers: [String; 4],
    pub rows: Vec<RowView>,
    pub empty_label: String,
    pub dialog_open: bool,
    /// Snackbar messages that are still visible, oldest first.
    pub notifications: Vec<String>,
}

impl PageView {
    pub fn new(
        translations: &Translations,
        class_name: &str,
        services: &[Service],
        dialog_open: bool,
    ) -> Self {
        Self {
            button: ButtonView::deploy(translations, class_name),
            headers: ["id", "name", "image", "status"].map(|key| translations.t(key).to_string()),
            rows: services.iter().map(RowView::from).collect(),
            empty_label: translations.t("no_services").to_string(),
            dialog_open,
            notifications: Vec::new(),
        }
    }

    pub fn with_notifications(mut self, notifications: Vec<String>) -> Self {
        self.notifications = notifications;
        self
    }
}

impl Display for PageView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[ {} ]", self.button.label)?;
        for notification in &self.notifications {
            writeln!(f, "» {notification}")?;
        }
        if self.rows.is_empty() {
            return writeln!(f, "{}", self.empty_label);
        }

        let mut widths = self.headers.each_ref().map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let headers = self.headers.each_ref().map(String::as_str);
        for cells in std::iter::once(headers).chain(self.rows.iter().map(RowView::cells)) {
            let line = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
