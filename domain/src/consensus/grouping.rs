//! Greedy similarity grouping of one round's responses.

use super::similarity::{SIMILARITY_THRESHOLD, TokenSet};
use crate::core::response::Response;
use serde::{Deserialize, Serialize};

/// Responses judged similar to the same seed response.
///
/// The groups produced for one round partition that round's responses:
/// every response belongs to exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseGroup {
    members: Vec<Response>,
}

impl ResponseGroup {
    fn seeded(seed: Response) -> Self {
        Self {
            members: vec![seed],
        }
    }

    /// The response that opened this group.
    pub fn seed(&self) -> &Response {
        &self.members[0]
    }

    pub fn responses(&self) -> &[Response] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a group is opened with its seed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn providers(&self) -> Vec<String> {
        self.members.iter().map(|r| r.provider.clone()).collect()
    }

    pub fn into_responses(self) -> Vec<Response> {
        self.members
    }
}

/// Group responses with the lexical Jaccard predicate.
pub fn group_responses(responses: &[Response]) -> Vec<ResponseGroup> {
    let token_sets: Vec<TokenSet> = responses
        .iter()
        .map(|r| TokenSet::from_text(&r.content))
        .collect();

    assign_groups(responses.len(), |seed, candidate| {
        token_sets[seed].jaccard(&token_sets[candidate]) > SIMILARITY_THRESHOLD
    })
    .into_iter()
    .map(|indices| collect_group(responses, &indices))
    .collect()
}

/// Group responses with a caller-supplied similarity predicate over contents.
///
/// Processes responses in input order. Each response not yet grouped seeds a
/// new group, which then absorbs every later ungrouped response the predicate
/// accepts against the seed.
pub fn group_responses_by<F>(responses: &[Response], similar: F) -> Vec<ResponseGroup>
where
    F: Fn(&str, &str) -> bool,
{
    assign_groups(responses.len(), |seed, candidate| {
        similar(&responses[seed].content, &responses[candidate].content)
    })
    .into_iter()
    .map(|indices| collect_group(responses, &indices))
    .collect()
}

/// Pick the largest group; on a tie the group opened first wins.
///
/// Returns the group's position in `groups` along with the group.
pub fn majority_group(groups: &[ResponseGroup]) -> Option<(usize, &ResponseGroup)> {
    let mut best: Option<(usize, &ResponseGroup)> = None;
    for (index, group) in groups.iter().enumerate() {
        match best {
            Some((_, current)) if group.len() <= current.len() => {}
            _ => best = Some((index, group)),
        }
    }
    best
}

/// Index-level greedy pass shared by both grouping entry points.
pub(crate) fn assign_groups<F>(count: usize, similar: F) -> Vec<Vec<usize>>
where
    F: Fn(usize, usize) -> bool,
{
    let mut grouped = vec![false; count];
    let mut groups = Vec::new();

    for seed in 0..count {
        if grouped[seed] {
            continue;
        }
        grouped[seed] = true;
        let mut members = vec![seed];

        for candidate in (seed + 1)..count {
            if !grouped[candidate] && similar(seed, candidate) {
                grouped[candidate] = true;
                members.push(candidate);
            }
        }

        groups.push(members);
    }

    groups
}

fn collect_group(responses: &[Response], indices: &[usize]) -> ResponseGroup {
    let mut group = ResponseGroup::seeded(responses[indices[0]].clone());
    group
        .members
        .extend(indices[1..].iter().map(|&i| responses[i].clone()));
    group
}
