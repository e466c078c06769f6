use praxis_core::GoldenThread;
use praxis_core::LensFilter;
use praxis_core::StatusFilter;

#[derive(Debug)]
pub(crate) enum AppEvent {
    /// Request to exit the application gracefully.
    ExitRequest,

    /// Navigate to a part dashboard. Resets the lens and status filters and
    /// clears any golden thread.
    SelectPart(u32),

    /// Return to the master matrix. Clears the golden thread only.
    ReturnToMaster,

    /// Set the active lens filter; clears the golden thread.
    SelectLensFilter(LensFilter),

    /// Set the active status filter; clears the golden thread.
    SelectStatusFilter(StatusFilter),

    /// Set or clear the golden thread trace. Setting a thread from the
    /// master view auto-navigates to the first part with a match.
    SetGoldenThread(Option<GoldenThread>),

    /// Open the drafting overlay for a chapter.
    OpenFocus(String),

    /// Close the drafting overlay, flushing any pending draft write.
    CloseFocus,

    /// Toggle the command palette.
    TogglePalette,

    /// A debounced draft save became due. The chapter id and generation echo
    /// the scheduling call so a stale timer can be ignored.
    DraftSaveDue { chapter_id: String, generation: u64 },

    /// A toast's lifetime elapsed; prune and repaint.
    ToastTick,
}
