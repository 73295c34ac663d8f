//! Group status for `hookah list`

use crate::dispatcher::{self, SlotState};
use crate::hooks::{HookLoader, is_script_name};
use hookah_config::Layout;
use hookah_core::{Result, System};
use serde::Serialize;

/// One group directory and the state of its hook slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStatus {
    /// Directory name
    pub name: String,
    /// Whether the name is a git hook
    pub recognized: bool,
    /// Script file names in run order
    pub scripts: Vec<String>,
    /// What occupies `.git/hooks/<name>`; `None` for unrecognized names
    pub slot: Option<SlotState>,
}

/// Status of every group in the source directory, sorted by name
pub fn list_groups(system: &dyn System, layout: &Layout) -> Result<Vec<GroupStatus>> {
    let loader = HookLoader::new(system, layout);

    loader
        .groups()?
        .into_iter()
        .map(|group| -> Result<GroupStatus> {
            let Some(hook) = group.hook else {
                // Not runnable, but show what is in there
                let scripts = system
                    .read_dir(&group.path)?
                    .into_iter()
                    .filter(|e| e.is_file() && is_script_name(&e.name))
                    .map(|e| e.name)
                    .collect();
                return Ok(GroupStatus {
                    name: group.name,
                    recognized: false,
                    scripts,
                    slot: None,
                });
            };

            let scripts = loader
                .scripts(hook)?
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();

            Ok(GroupStatus {
                name: group.name,
                recognized: true,
                scripts,
                slot: Some(dispatcher::slot_state(system, layout, hook)?),
            })
        })
        .collect()
}
