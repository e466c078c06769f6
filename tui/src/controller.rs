use std::sync::Arc;

use praxis_core::Dataset;
use praxis_core::GoldenThread;
use praxis_core::LensFilter;
use praxis_core::StatusFilter;
use praxis_core::first_part_with_match;

/// Where the dashboard is looking: the master matrix, or one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewState {
    Master,
    Part { part_id: u32 },
}

/// Owns navigation and filter state for the whole dashboard.
///
/// Every operation is a synchronous total function: there is no error path.
/// A part id with no matching part stays in the state and is rendered as an
/// inline not-found panel by the part view, with Escape as the recovery
/// action.
pub(crate) struct ViewController {
    dataset: Arc<Dataset>,
    view: ViewState,
    lens_filter: LensFilter,
    status_filter: StatusFilter,
    golden_thread: Option<GoldenThread>,
    focused_chapter: Option<String>,
    palette_open: bool,
}

impl ViewController {
    pub(crate) fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            view: ViewState::Master,
            lens_filter: LensFilter::All,
            status_filter: StatusFilter::All,
            golden_thread: None,
            focused_chapter: None,
            palette_open: false,
        }
    }

    pub(crate) fn view(&self) -> ViewState {
        self.view
    }

    pub(crate) fn lens_filter(&self) -> LensFilter {
        self.lens_filter
    }

    pub(crate) fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub(crate) fn golden_thread(&self) -> Option<&GoldenThread> {
        self.golden_thread.as_ref()
    }

    pub(crate) fn focused_chapter(&self) -> Option<&str> {
        self.focused_chapter.as_deref()
    }

    pub(crate) fn palette_open(&self) -> bool {
        self.palette_open
    }

    /// Enter a part dashboard. Both filters reset and any golden thread is
    /// cleared; a manual navigation always starts from a clean slate.
    pub(crate) fn select_part(&mut self, part_id: u32) {
        self.view = ViewState::Part { part_id };
        self.lens_filter = LensFilter::All;
        self.status_filter = StatusFilter::All;
        self.golden_thread = None;
    }

    /// Return to the master matrix. Filters are deliberately retained for
    /// the next part entry; only the golden thread is cleared.
    pub(crate) fn return_to_master(&mut self) {
        self.view = ViewState::Master;
        self.golden_thread = None;
    }

    pub(crate) fn select_lens_filter(&mut self, filter: LensFilter) {
        self.lens_filter = filter;
        self.golden_thread = None;
    }

    pub(crate) fn select_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.golden_thread = None;
    }

    /// Set or clear the golden thread. Setting a thread from the master
    /// view scans parts in dataset order and navigates to the first part
    /// with a matching chapter — via `select_part`, whose reset semantics
    /// therefore apply to the just-set thread as well.
    pub(crate) fn set_golden_thread(&mut self, thread: Option<GoldenThread>) {
        self.golden_thread = thread;
        let Some(active) = self.golden_thread.as_ref() else {
            return;
        };
        if self.view != ViewState::Master {
            return;
        }
        let target = first_part_with_match(&self.dataset, active);
        if let Some(part_id) = target {
            self.select_part(part_id);
        }
    }

    pub(crate) fn open_focus(&mut self, chapter_id: String) {
        self.focused_chapter = Some(chapter_id);
    }

    pub(crate) fn close_focus(&mut self) {
        self.focused_chapter = None;
    }

    pub(crate) fn toggle_palette(&mut self) {
        self.palette_open = !self.palette_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_core::ChapterStatus;
    use praxis_core::LensKey;
    use pretty_assertions::assert_eq;

    fn controller() -> ViewController {
        let dataset = Arc::new(Dataset::builtin().expect("bundled dataset"));
        ViewController::new(dataset)
    }

    #[test]
    fn select_part_resets_filters() {
        let mut ctrl = controller();
        let part_ids: Vec<u32> = ctrl.dataset.parts.iter().map(|part| part.id).collect();
        for part_id in part_ids {
            ctrl.select_lens_filter(LensFilter::Key(LensKey::NarrativePower));
            ctrl.select_status_filter(StatusFilter::Status(ChapterStatus::Final));
            ctrl.select_part(part_id);
            assert_eq!(ctrl.view(), ViewState::Part { part_id });
            assert_eq!(ctrl.lens_filter(), LensFilter::All);
            assert_eq!(ctrl.status_filter(), StatusFilter::All);
        }
    }

    #[test]
    fn filter_changes_clear_the_golden_thread() {
        let thread = GoldenThread::Lens {
            key: LensKey::NarrativePower,
        };

        let mut ctrl = controller();
        ctrl.select_part(1);
        ctrl.set_golden_thread(Some(thread.clone()));
        assert!(ctrl.golden_thread().is_some());
        ctrl.select_lens_filter(LensFilter::All);
        assert!(ctrl.golden_thread().is_none());

        ctrl.set_golden_thread(Some(thread.clone()));
        ctrl.select_status_filter(StatusFilter::Status(ChapterStatus::Draft));
        assert!(ctrl.golden_thread().is_none());

        ctrl.set_golden_thread(Some(thread.clone()));
        ctrl.select_part(2);
        assert!(ctrl.golden_thread().is_none());

        ctrl.set_golden_thread(Some(thread));
        ctrl.return_to_master();
        assert!(ctrl.golden_thread().is_none());
    }

    #[test]
    fn thread_from_master_navigates_to_first_matching_part() {
        let mut ctrl = controller();
        assert_eq!(ctrl.view(), ViewState::Master);
        ctrl.set_golden_thread(Some(GoldenThread::Lens {
            key: LensKey::NarrativePower,
        }));
        let expected = first_part_with_match(
            &ctrl.dataset,
            &GoldenThread::Lens {
                key: LensKey::NarrativePower,
            },
        )
        .expect("bundled dataset has narrative annotations");
        assert_eq!(ctrl.view(), ViewState::Part { part_id: expected });
        // Navigation goes through select_part, so its reset clears the
        // thread that triggered it.
        assert!(ctrl.golden_thread().is_none());
    }

    #[test]
    fn thread_inside_a_part_stays_put() {
        let mut ctrl = controller();
        ctrl.select_part(2);
        let thread = GoldenThread::Motif {
            name: "Rupture".to_string(),
        };
        ctrl.set_golden_thread(Some(thread.clone()));
        assert_eq!(ctrl.view(), ViewState::Part { part_id: 2 });
        assert_eq!(ctrl.golden_thread(), Some(&thread));
    }

    #[test]
    fn clearing_the_thread_never_navigates() {
        let mut ctrl = controller();
        ctrl.set_golden_thread(None);
        assert_eq!(ctrl.view(), ViewState::Master);

        ctrl.select_part(3);
        ctrl.set_golden_thread(None);
        assert_eq!(ctrl.view(), ViewState::Part { part_id: 3 });
    }

    #[test]
    fn unmatched_thread_from_master_stays_on_master() {
        let mut ctrl = controller();
        let thread = GoldenThread::Motif {
            name: "No Such Motif".to_string(),
        };
        ctrl.set_golden_thread(Some(thread.clone()));
        assert_eq!(ctrl.view(), ViewState::Master);
        assert_eq!(ctrl.golden_thread(), Some(&thread));
    }

    #[test]
    fn return_to_master_retains_filters() {
        let mut ctrl = controller();
        ctrl.select_part(1);
        ctrl.select_lens_filter(LensFilter::Key(LensKey::HumanAgency));
        ctrl.select_status_filter(StatusFilter::Status(ChapterStatus::Review));
        ctrl.return_to_master();
        assert_eq!(ctrl.view(), ViewState::Master);
        assert_eq!(ctrl.lens_filter(), LensFilter::Key(LensKey::HumanAgency));
        assert_eq!(
            ctrl.status_filter(),
            StatusFilter::Status(ChapterStatus::Review)
        );
    }

    #[test]
    fn focus_and_palette_are_plain_toggles() {
        let mut ctrl = controller();
        ctrl.open_focus("p1c2".to_string());
        assert_eq!(ctrl.focused_chapter(), Some("p1c2"));
        ctrl.close_focus();
        assert_eq!(ctrl.focused_chapter(), None);

        assert!(!ctrl.palette_open());
        ctrl.toggle_palette();
        assert!(ctrl.palette_open());
        ctrl.toggle_palette();
        assert!(!ctrl.palette_open());
    }

    #[test]
    fn nonexistent_part_id_is_not_an_error() {
        let mut ctrl = controller();
        ctrl.select_part(9999);
        assert_eq!(ctrl.view(), ViewState::Part { part_id: 9999 });
    }
}
