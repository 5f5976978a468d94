use leptos::prelude::*;
use workflow_mindmap::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
