mod fruchterman_reingold;

pub use fruchterman_reingold::{ForceLayout, LayoutState};
