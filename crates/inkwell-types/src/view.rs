use crate::models::EntryId;

/// A bounds-checked entry ready for rendering, with its sibling positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub content: String,
    pub timestamp: String,
    pub editing: bool,
    pub previous: Option<EntryId>,
    pub next: Option<EntryId>,
    pub edit_target: EntryId,
    pub current_index: EntryId,
    pub total_count: EntryId,
}

impl View {
    pub fn prev_link(&self) -> Option<String> {
        self.previous.map(entry_path)
    }

    pub fn next_link(&self) -> Option<String> {
        self.next.map(entry_path)
    }

    pub fn edit_link(&self) -> String {
        format!("{}?edit=true", entry_path(self.edit_target))
    }

    pub fn view_link(&self) -> String {
        entry_path(self.current_index)
    }
}

/// Canonical path of the page showing entry `id`.
pub fn entry_path(id: EntryId) -> String {
    format!("/entry/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_at(id: EntryId, total: EntryId) -> View {
        View {
            content: "x".into(),
            timestamp: "Jan 02, 2006 15:04:05 UTC".into(),
            editing: false,
            previous: (id > 1).then_some(id - 1),
            next: (id < total).then_some(id + 1),
            edit_target: id,
            current_index: id,
            total_count: total,
        }
    }

    #[test]
    fn links_follow_positions() {
        let view = view_at(3, 5);
        assert_eq!(view.prev_link().as_deref(), Some("/entry/2"));
        assert_eq!(view.next_link().as_deref(), Some("/entry/4"));
        assert_eq!(view.edit_link(), "/entry/3?edit=true");
        assert_eq!(view.view_link(), "/entry/3");
    }

    #[test]
    fn absent_positions_have_no_links() {
        let view = view_at(1, 1);
        assert!(view.prev_link().is_none());
        assert!(view.next_link().is_none());
    }
}
