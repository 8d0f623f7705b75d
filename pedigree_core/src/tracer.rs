//! Backward coalescence of paternal or maternal lineages.
//!
//! Starting from the survivors of one sex, ancestry is walked from the most
//! recently born individual backwards. Each survivor heads one lineage; two
//! lineages coalesce when an individual's parent has already been reached
//! through another lineage.

use crate::individual::{Individual, IndividualId, Sex};
use crate::population::Population;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Which parental line to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lineage {
    /// Father links, through males
    Paternal,

    /// Mother links, through females
    Maternal,
}

impl Lineage {
    /// Sex of the individuals carrying this lineage.
    pub fn sex(&self) -> Sex {
        match self {
            Lineage::Paternal => Sex::Male,
            Lineage::Maternal => Sex::Female,
        }
    }

    /// The parent this lineage continues through.
    pub fn parent(&self, individual: &Individual) -> Option<IndividualId> {
        match self {
            Lineage::Paternal => individual.father(),
            Lineage::Maternal => individual.mother(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Lineage::Paternal => "paternal",
            Lineage::Maternal => "maternal",
        }
    }
}

/// Number of distinct lineages left once ancestry back to `time` is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoalescencePoint {
    pub time: f64,
    pub lineages: usize,
}

impl CoalescencePoint {
    pub fn new(time: f64, lineages: usize) -> Self {
        Self { time, lineages }
    }
}

/// Heap entry ordered by birth time, latest first.
#[derive(Debug, Clone, Copy)]
struct ByBirth {
    birth_time: f64,
    id: IndividualId,
}

impl ByBirth {
    fn of(individual: &Individual, id: IndividualId) -> Self {
        Self {
            birth_time: individual.birth_time(),
            id,
        }
    }
}

impl PartialEq for ByBirth {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByBirth {}

impl PartialOrd for ByBirth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByBirth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.birth_time
            .total_cmp(&other.birth_time)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Traces `lineage` back from `survivors`.
///
/// The first point is always `(0.0, heads)` where `heads` is the number of
/// distinct survivors of the lineage's sex. Every following point is one
/// coalescence, reported at the birth time of the individual whose parent
/// was found already reached, with merges listed most recent first. A
/// lineage reaching a founder simply stops.
///
/// Ids that `population` does not know are skipped. Neither argument is
/// modified.
pub fn trace_coalescence(
    population: &Population,
    survivors: &[IndividualId],
    lineage: Lineage,
) -> Vec<CoalescencePoint> {
    let target = lineage.sex();
    let mut seen: HashSet<IndividualId> = HashSet::new();
    let mut heap: BinaryHeap<ByBirth> = BinaryHeap::new();

    for &id in survivors {
        let Some(individual) = population.get(id) else {
            continue;
        };
        if individual.sex() == target && seen.insert(id) {
            heap.push(ByBirth::of(individual, id));
        }
    }

    let mut lineages = seen.len();
    let mut points = vec![CoalescencePoint::new(0.0, lineages)];

    // With a single queued individual no further merge is possible
    while heap.len() > 1 {
        let Some(current) = heap.pop() else { break };
        let Some(parent) = population
            .get(current.id)
            .and_then(|individual| lineage.parent(individual))
        else {
            continue;
        };
        let Some(parent_individual) = population.get(parent) else {
            continue;
        };

        if seen.insert(parent) {
            heap.push(ByBirth::of(parent_individual, parent));
        } else {
            lineages -= 1;
            points.push(CoalescencePoint::new(current.birth_time, lineages));
            seen.remove(&current.id);
        }
    }

    points
}

/// Traces father-to-son lines.
pub fn trace_paternal(
    population: &Population,
    survivors: &[IndividualId],
) -> Vec<CoalescencePoint> {
    trace_coalescence(population, survivors, Lineage::Paternal)
}

/// Traces mother-to-daughter lines.
pub fn trace_maternal(
    population: &Population,
    survivors: &[IndividualId],
) -> Vec<CoalescencePoint> {
    trace_coalescence(population, survivors, Lineage::Maternal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn founder(population: &mut Population, sex: Sex) -> IndividualId {
        population.spawn(Individual::founder(sex))
    }

    fn child(
        population: &mut Population,
        mother: IndividualId,
        father: IndividualId,
        born: f64,
        sex: Sex,
    ) -> IndividualId {
        population.spawn(Individual::offspring(mother, father, born, sex))
    }

    fn points(pairs: &[(f64, usize)]) -> Vec<CoalescencePoint> {
        pairs.iter().map(|&(t, n)| CoalescencePoint::new(t, n)).collect()
    }

    #[test]
    fn test_founders_only() {
        let mut population = Population::new();
        let survivors: Vec<_> = (0..4).map(|_| founder(&mut population, Sex::Male)).collect();

        assert_eq!(trace_paternal(&population, &survivors), points(&[(0.0, 4)]));
        assert_eq!(trace_maternal(&population, &survivors), points(&[(0.0, 0)]));
    }

    #[test]
    fn test_empty_snapshot() {
        let population = Population::new();
        assert_eq!(trace_paternal(&population, &[]), points(&[(0.0, 0)]));
    }

    #[test]
    fn test_brothers_merge_at_father() {
        let mut population = Population::new();
        let father = founder(&mut population, Sex::Male);
        let mother = founder(&mut population, Sex::Female);
        let elder = child(&mut population, mother, father, 10.0, Sex::Male);
        let younger = child(&mut population, mother, father, 20.0, Sex::Male);

        let result = trace_paternal(&population, &[elder, younger]);
        assert_eq!(result, points(&[(0.0, 2), (10.0, 1)]));
        assert_eq!(result[0].lineages - result[1].lineages, 1);
    }

    #[test]
    fn test_sisters_merge_only_maternally() {
        let mut population = Population::new();
        let mother = founder(&mut population, Sex::Female);
        let father_a = founder(&mut population, Sex::Male);
        let father_b = founder(&mut population, Sex::Male);
        let a = child(&mut population, mother, father_a, 18.0, Sex::Female);
        let b = child(&mut population, mother, father_b, 23.0, Sex::Female);

        assert_eq!(trace_maternal(&population, &[a, b]), points(&[(0.0, 2), (18.0, 1)]));
        // daughters carry no paternal lineage
        assert_eq!(trace_paternal(&population, &[a, b]), points(&[(0.0, 0)]));
    }

    #[test]
    fn test_surviving_father_absorbs_son() {
        let mut population = Population::new();
        let father = founder(&mut population, Sex::Male);
        let mother = founder(&mut population, Sex::Female);
        let son = child(&mut population, mother, father, 30.0, Sex::Male);

        assert_eq!(trace_paternal(&population, &[father, son]), points(&[(0.0, 2), (30.0, 1)]));
    }

    #[test]
    fn test_three_generations_report_latest_merge_first() {
        let mut population = Population::new();
        let grandmother = founder(&mut population, Sex::Female);
        let grandfather = founder(&mut population, Sex::Male);
        let uncle = child(&mut population, grandmother, grandfather, 20.0, Sex::Male);
        let dad = child(&mut population, grandmother, grandfather, 25.0, Sex::Male);
        let mother = founder(&mut population, Sex::Female);
        let x = child(&mut population, mother, uncle, 45.0, Sex::Male);
        let z = child(&mut population, mother, uncle, 48.0, Sex::Male);
        let y = child(&mut population, mother, dad, 50.0, Sex::Male);

        let result = trace_paternal(&population, &[x, y, z]);
        assert_eq!(result, points(&[(0.0, 3), (45.0, 2), (20.0, 1)]));

        for pair in result.windows(2) {
            assert!(pair[1].lineages < pair[0].lineages);
        }
    }

    #[test]
    fn test_unrelated_lines_end_at_founders() {
        let mut population = Population::new();
        let mother = founder(&mut population, Sex::Female);
        let father_a = founder(&mut population, Sex::Male);
        let father_b = founder(&mut population, Sex::Male);
        let a = child(&mut population, mother, father_a, 20.0, Sex::Male);
        let b = child(&mut population, mother, father_b, 22.0, Sex::Male);

        assert_eq!(trace_paternal(&population, &[a, b]), points(&[(0.0, 2)]));
        // they do share a mother, but they are not on the maternal line
        assert_eq!(trace_maternal(&population, &[a, b]), points(&[(0.0, 0)]));
    }

    #[test]
    fn test_duplicate_survivors_count_once() {
        let mut population = Population::new();
        let a = founder(&mut population, Sex::Female);

        assert_eq!(trace_maternal(&population, &[a, a, a]), points(&[(0.0, 1)]));
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let mut population = Population::new();
        let a = founder(&mut population, Sex::Male);
        let b = founder(&mut population, Sex::Male);

        let survivors = [a, IndividualId(99), b];
        assert_eq!(trace_paternal(&population, &survivors), points(&[(0.0, 2)]));
    }

    #[test]
    fn test_tracing_is_repeatable() {
        let mut population = Population::new();
        let mother = founder(&mut population, Sex::Female);
        let father = founder(&mut population, Sex::Male);
        let survivors: Vec<_> = (0..6)
            .map(|i| child(&mut population, mother, father, 16.0 + i as f64, Sex::Female))
            .collect();
        let before = survivors.clone();

        let first = trace_maternal(&population, &survivors);
        let second = trace_maternal(&population, &survivors);

        assert_eq!(first, second);
        assert_eq!(survivors, before);
        assert_eq!(first.len(), 6);
        assert_eq!(first.last().map(|p| p.lineages), Some(1));
    }

    #[test]
    fn test_lineage_helpers() {
        assert_eq!(Lineage::Paternal.sex(), Sex::Male);
        assert_eq!(Lineage::Maternal.sex(), Sex::Female);
        assert_eq!(Lineage::Paternal.name(), "paternal");

        let kid = Individual::offspring(IndividualId(4), IndividualId(9), 1.0, Sex::Male);
        assert_eq!(Lineage::Paternal.parent(&kid), Some(IndividualId(9)));
        assert_eq!(Lineage::Maternal.parent(&kid), Some(IndividualId(4)));
    }
}
