#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Horizontal scroll of every track, in columns.
    Scroll(i32),
    /// Wheel scroll over the cell at (column, row).
    ScrollAt(u16, u16, i32),
    ZoomIn,
    ZoomOut,
    ZoomReset,
    CycleUnit,
    ToggleCharts,
    CycleTheme,
    Reload,
    ToggleHelp,
    NextModule,
    PrevModule,
    SelectAt(u16, u16),
    None,
}
