/// Every key press the picker understands resolves to an Action.
/// The UI never mutates selection state directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Cancel,
    Confirm,

    // Search
    SearchPush(char),
    SearchPop,

    // Movement
    MoveSelection(i32),
    PageUp,
    PageDown,
    MoveTop,
    MoveBottom,

    // Pinning
    Pin,
    Unpin,
}
