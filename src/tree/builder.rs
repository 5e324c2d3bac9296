//! Chain builder: the root-to-parent groups implied by one story path

use crate::ids::IdSynthesis;
use crate::tree::path::SplitPath;
use crate::tree::Group;
use tracing::trace;

/// Build the group chain for a split path, root first.
///
/// Each group's id is synthesized from its parent's id and its own name, so
/// the same path always yields the same ids. The last group is the component
/// (parent of the leaf). Children are left empty; see [`link_chain`].
pub fn build_chain(split: &SplitPath, ids: &dyn IdSynthesis) -> Vec<Group> {
    let names: Vec<&str> = split.segments().collect();
    let last = names.len().saturating_sub(1);
    let mut chain: Vec<Group> = Vec::with_capacity(names.len());

    for (depth, name) in names.into_iter().enumerate() {
        let parent = chain.last().map(|group| group.id.clone());
        let id = ids.group_id(parent.as_deref(), name);
        trace!(id = %id, depth, "Chain group");

        chain.push(Group {
            id,
            name: name.to_string(),
            children: Vec::new(),
            parent,
            depth,
            is_root: split.root.is_some() && depth == 0,
            is_component: depth == last,
        });
    }

    chain
}

/// Give each group a one-element `children` pointing at the next group,
/// and the component group one pointing at `leaf_id`.
pub fn link_chain(chain: &mut [Group], leaf_id: &str) {
    let next_ids: Vec<String> = chain
        .iter()
        .skip(1)
        .map(|group| group.id.clone())
        .chain(std::iter::once(leaf_id.to_string()))
        .collect();

    for (group, next) in chain.iter_mut().zip(next_ids) {
        group.children = vec![next];
    }
}
