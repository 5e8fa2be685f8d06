//! Family kinship engine — pure graph traversal, no I/O.
//!
//! Builds three adjacency maps from a flat relationship list and walks them
//! in the canonical order (parents, siblings, grandparents, ...) to compute
//! every named relation from one person's perspective, each emitted once.

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const MAX_ANCESTOR_DEPTH: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonStatus {
    Living,
    Deceased,
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub maiden_name: Option<String>,
    pub born: Option<i32>,
    pub status: PersonStatus,
    pub player: bool,
    pub placeholder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    ParentOf,
    Married,
    Divorced,
}

#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: Uuid,
    pub rel_type: RelationshipType,
    pub from_id: Uuid,
    pub to_id: Uuid,
}

/// A resolved relationship label from the player's perspective.
#[derive(Debug, Clone)]
pub struct NamedRelation {
    pub person: Person,
    pub label: String,
    pub generation: i32,
    pub difficulty: u8,
}

/// In-memory family graph built once per deck-generation request.
pub struct FamilyGraph {
    people: HashMap<Uuid, Person>,
    parents: HashMap<Uuid, Vec<Uuid>>,
    children: HashMap<Uuid, Vec<Uuid>>,
    spouses: HashMap<Uuid, Vec<Uuid>>,
}

impl FamilyGraph {
    pub fn new(people: Vec<Person>, relationships: &[Relationship]) -> Self {
        let mut parents: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut spouses: HashMap<Uuid, Vec<Uuid>> = HashMap::new();

        for rel in relationships {
            match rel.rel_type {
                RelationshipType::ParentOf => {
                    children.entry(rel.from_id).or_default().push(rel.to_id);
                    parents.entry(rel.to_id).or_default().push(rel.from_id);
                }
                RelationshipType::Married | RelationshipType::Divorced => {
                    spouses.entry(rel.from_id).or_default().push(rel.to_id);
                    spouses.entry(rel.to_id).or_default().push(rel.from_id);
                }
            }
        }

        let people = people.into_iter().map(|p| (p.id, p)).collect();
        Self { people, parents, children, spouses }
    }

    fn get(&self, id: Uuid) -> Option<&Person> {
        self.people.get(&id)
    }

    fn parents_of(&self, id: Uuid) -> &[Uuid] {
        self.parents.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn spouses_of(&self, id: Uuid) -> &[Uuid] {
        self.spouses.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_ancestor_of(&self, ancestor_id: Uuid, person_id: Uuid, depth: u8) -> bool {
        if depth > MAX_ANCESTOR_DEPTH {
            return false;
        }
        if ancestor_id == person_id {
            return true;
        }
        self.parents_of(person_id)
            .iter()
            .any(|&parent| self.is_ancestor_of(ancestor_id, parent, depth + 1))
    }

    /// Side label ("paternal"/"maternal") for the branch reachable through
    /// `parent_id`, determined by that parent's index in the player's
    /// two-parent list. Empty when the player has fewer than two parents.
    fn side_label(&self, parent_id: Uuid, player_id: Uuid) -> &'static str {
        let parents = self.parents_of(player_id);
        if parents.len() < 2 {
            return "";
        }
        for (i, &pid) in parents.iter().enumerate() {
            if parent_id == pid || self.is_ancestor_of(parent_id, pid, 0) {
                return if i == 0 { "paternal" } else { "maternal" };
            }
        }
        ""
    }

    fn labeled(side: &str, suffix: &str) -> String {
        if side.is_empty() { suffix.to_string() } else { format!("{side} {suffix}") }
    }

    /// Compute every named relation reachable from `player_id`, each person
    /// emitted at most once, in the canonical traversal order (parents,
    /// siblings, grandparents, great-grandparents, aunts/uncles and their
    /// spouses, great-aunts/uncles, cousins, then the player's own spouses).
    pub fn compute_relations(&self, player_id: Uuid) -> Vec<NamedRelation> {
        let mut results = Vec::new();
        if self.get(player_id).is_none() {
            return results;
        }

        let mut seen: HashSet<Uuid> = HashSet::from([player_id]);
        let mut emit = |results: &mut Vec<NamedRelation>, seen: &mut HashSet<Uuid>, id: Uuid, label: String, generation: i32, difficulty: u8| {
            if seen.contains(&id) {
                return;
            }
            let Some(person) = self.get(id) else { return };
            seen.insert(id);
            results.push(NamedRelation { person: person.clone(), label, generation, difficulty });
        };

        // Parents
        let parents: Vec<Uuid> = self.parents_of(player_id).to_vec();
        for &pid in &parents {
            emit(&mut results, &mut seen, pid, "parent".to_string(), 1, 1);
        }

        // Siblings
        let mut siblings: HashSet<Uuid> = HashSet::new();
        for &pid in &parents {
            for &child in self.children_of(pid) {
                if child != player_id {
                    siblings.insert(child);
                }
            }
        }
        for sid in siblings {
            emit(&mut results, &mut seen, sid, "sibling".to_string(), 0, 1);
        }

        // Grandparents (remember which parent-branch side each came through)
        let mut grandparents: Vec<(Uuid, &'static str)> = Vec::new();
        for &pid in &parents {
            let side = self.side_label(pid, player_id);
            for &gp in self.parents_of(pid) {
                grandparents.push((gp, side));
            }
        }
        for &(gp, side) in &grandparents {
            emit(&mut results, &mut seen, gp, Self::labeled(side, "grandparent"), 2, 2);
        }

        // Great-grandparents
        for &(gp, side) in &grandparents {
            for &ggp in self.parents_of(gp) {
                emit(&mut results, &mut seen, ggp, Self::labeled(side, "great-grandparent"), 3, 3);
            }
        }

        // Aunts/uncles
        let mut aunts_uncles: HashSet<Uuid> = HashSet::new();
        for &pid in &parents {
            for &gp in self.parents_of(pid) {
                for &au in self.children_of(gp) {
                    if !parents.contains(&au) && au != player_id {
                        aunts_uncles.insert(au);
                    }
                }
            }
        }
        let aunts_uncles_snapshot: Vec<Uuid> = aunts_uncles.iter().copied().collect();
        for &au in &aunts_uncles_snapshot {
            emit(&mut results, &mut seen, au, "aunt/uncle".to_string(), 1, 2);
            // Aunts/uncles by marriage
            for &spouse in self.spouses_of(au).to_vec().iter() {
                emit(&mut results, &mut seen, spouse, "aunt/uncle (by marriage)".to_string(), 1, 2);
            }
        }

        // Great-aunts/uncles
        for &(gp, side) in &grandparents {
            for &ggp in self.parents_of(gp) {
                for &gau in self.children_of(ggp) {
                    if gau != gp {
                        emit(&mut results, &mut seen, gau, Self::labeled(side, "great-aunt/uncle"), 2, 3);
                    }
                }
            }
        }

        // Cousins
        for &au in &aunts_uncles_snapshot {
            for &cousin in self.children_of(au).to_vec().iter() {
                emit(&mut results, &mut seen, cousin, "cousin".to_string(), 0, 3);
            }
        }

        // Player's spouses
        for &sp in self.spouses_of(player_id).to_vec().iter() {
            emit(&mut results, &mut seen, sp, "spouse".to_string(), 0, 1);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str) -> Person {
        Person {
            id: Uuid::new_v4(),
            name: name.to_string(),
            nickname: None,
            maiden_name: None,
            born: None,
            status: PersonStatus::Living,
            player: false,
            placeholder: false,
        }
    }

    fn parent_of(from: Uuid, to: Uuid) -> Relationship {
        Relationship { id: Uuid::new_v4(), rel_type: RelationshipType::ParentOf, from_id: from, to_id: to }
    }

    #[test]
    fn two_parent_family_labels_paternal_and_maternal() {
        let alice = person("Alice");
        let bob = person("Bob");
        let carol = person("Carol");
        let dan = person("Dan");
        let (alice_id, bob_id, carol_id, dan_id) = (alice.id, bob.id, carol.id, dan.id);

        let rels = vec![
            parent_of(bob_id, alice_id),
            parent_of(carol_id, alice_id),
            parent_of(dan_id, bob_id),
        ];
        let graph = FamilyGraph::new(vec![alice, bob, carol, dan], &rels);
        let relations = graph.compute_relations(alice_id);

        let find = |id: Uuid| relations.iter().find(|r| r.person.id == id).unwrap();
        assert_eq!(find(bob_id).label, "parent");
        assert_eq!(find(carol_id).label, "parent");
        assert_eq!(find(dan_id).label, "paternal grandparent");
        assert_eq!(find(dan_id).generation, 2);
    }

    #[test]
    fn player_is_excluded_and_each_person_appears_once() {
        let alice = person("Alice");
        let bob = person("Bob");
        let (alice_id, bob_id) = (alice.id, bob.id);
        let rels = vec![parent_of(bob_id, alice_id)];
        let graph = FamilyGraph::new(vec![alice, bob], &rels);
        let relations = graph.compute_relations(alice_id);

        assert!(relations.iter().all(|r| r.person.id != alice_id));
        let mut ids: Vec<Uuid> = relations.iter().map(|r| r.person.id).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(before, ids.len());
    }

    #[test]
    fn siblings_share_a_parent_and_have_no_side_label() {
        let alice = person("Alice");
        let zoe = person("Zoe");
        let bob = person("Bob");
        let (alice_id, zoe_id, bob_id) = (alice.id, zoe.id, bob.id);
        let rels = vec![parent_of(bob_id, alice_id), parent_of(bob_id, zoe_id)];
        let graph = FamilyGraph::new(vec![alice, zoe, bob], &rels);
        let relations = graph.compute_relations(alice_id);

        let sibling = relations.iter().find(|r| r.person.id == zoe_id).unwrap();
        assert_eq!(sibling.label, "sibling");
        assert_eq!(sibling.generation, 0);
    }

    #[test]
    fn coverage_within_three_edges_is_reachable() {
        // player -> parent -> grandparent -> great-grandparent is 3 edges.
        let alice = person("Alice");
        let bob = person("Bob");
        let dan = person("Dan");
        let eve = person("Eve");
        let (alice_id, bob_id, dan_id, eve_id) = (alice.id, bob.id, dan.id, eve.id);
        let rels = vec![parent_of(bob_id, alice_id), parent_of(dan_id, bob_id), parent_of(eve_id, dan_id)];
        let graph = FamilyGraph::new(vec![alice, bob, dan, eve], &rels);
        let relations = graph.compute_relations(alice_id);

        assert!(relations.iter().any(|r| r.person.id == eve_id));
    }

    #[test]
    fn unknown_player_returns_empty() {
        let alice = person("Alice");
        let graph = FamilyGraph::new(vec![alice], &[]);
        assert!(graph.compute_relations(Uuid::new_v4()).is_empty());
    }
}
