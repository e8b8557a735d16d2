//! Cached answers to question snippets.
//!
//! Answers are produced outside this crate (by a reasoner running a question
//! as a query) and stored here so that the question does not have to be
//! re-evaluated on every display. Entries are only replaced by an explicit
//! [`AnswerCache::set`].

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A set of entities the reasoner considers equivalent.
pub type AnswerNode<E> = BTreeSet<E>;

/// The answer to one question.
///
/// Each node list is `None` until the producer has computed it, which
/// distinguishes "not computed" from "no answers".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer<E: Ord> {
    satisfiable: bool,
    individuals: Option<Vec<AnswerNode<E>>>,
    sub_classes: Option<Vec<AnswerNode<E>>>,
    super_classes: Option<Vec<AnswerNode<E>>>,
    individuals_complete: bool,
    sub_classes_complete: bool,
}

impl<E: Ord + Clone> Answer<E> {
    /// An answer to a satisfiable question with nothing computed yet.
    pub fn new() -> Self {
        Self {
            satisfiable: true,
            individuals: None,
            sub_classes: None,
            super_classes: None,
            individuals_complete: false,
            sub_classes_complete: false,
        }
    }

    /// The answer to a question whose query is unsatisfiable.
    pub fn unsatisfiable() -> Self {
        Self {
            satisfiable: false,
            ..Self::new()
        }
    }

    pub fn with_individuals(mut self, nodes: Vec<AnswerNode<E>>) -> Self {
        self.individuals = Some(nodes);
        self
    }

    pub fn with_sub_classes(mut self, nodes: Vec<AnswerNode<E>>) -> Self {
        self.sub_classes = Some(nodes);
        self
    }

    pub fn with_super_classes(mut self, nodes: Vec<AnswerNode<E>>) -> Self {
        self.super_classes = Some(nodes);
        self
    }

    pub fn is_satisfiable(&self) -> bool {
        self.satisfiable
    }

    pub fn individuals(&self) -> Option<&[AnswerNode<E>]> {
        self.individuals.as_deref()
    }

    pub fn sub_classes(&self) -> Option<&[AnswerNode<E>]> {
        self.sub_classes.as_deref()
    }

    pub fn super_classes(&self) -> Option<&[AnswerNode<E>]> {
        self.super_classes.as_deref()
    }

    pub fn individual_count(&self) -> Option<usize> {
        self.individuals.as_ref().map(Vec::len)
    }

    pub fn sub_class_count(&self) -> Option<usize> {
        self.sub_classes.as_ref().map(Vec::len)
    }

    pub fn super_class_count(&self) -> Option<usize> {
        self.super_classes.as_ref().map(Vec::len)
    }

    /// Every entity in every computed node.
    pub fn entities(&self) -> BTreeSet<E> {
        [&self.individuals, &self.sub_classes, &self.super_classes]
            .into_iter()
            .flatten()
            .flatten()
            .flatten()
            .cloned()
            .collect()
    }

    /// Satisfiable, but no individuals, sub-classes or super-classes are known.
    pub fn has_no_known_answers(&self) -> bool {
        self.satisfiable && self.entities().is_empty()
    }

    /// Whether the user declared the individuals answer complete.
    pub fn individuals_complete(&self) -> bool {
        self.individuals_complete
    }

    pub fn set_individuals_complete(&mut self, complete: bool) {
        self.individuals_complete = complete;
    }

    /// Whether the user declared the sub-classes answer complete.
    pub fn sub_classes_complete(&self) -> bool {
        self.sub_classes_complete
    }

    pub fn set_sub_classes_complete(&mut self, complete: bool) {
        self.sub_classes_complete = complete;
    }
}

impl<E: Ord + Clone> Default for Answer<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Answers keyed by the sentence sequence of their question.
#[derive(Debug, Clone)]
pub struct AnswerCache<S, E: Ord> {
    answers: HashMap<Vec<S>, Answer<E>>,
}

impl<S: Hash + Eq + Clone, E: Ord + Clone> AnswerCache<S, E> {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
        }
    }

    /// Store `answer`, replacing any previous answer to the same question.
    pub fn set(&mut self, question: &[S], answer: Answer<E>) -> Option<Answer<E>> {
        self.answers.insert(question.to_vec(), answer)
    }

    pub fn get(&self, question: &[S]) -> Option<&Answer<E>> {
        self.answers.get(question)
    }

    pub fn get_mut(&mut self, question: &[S]) -> Option<&mut Answer<E>> {
        self.answers.get_mut(question)
    }

    pub fn remove(&mut self, question: &[S]) -> Option<Answer<E>> {
        self.answers.remove(question)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

impl<S: Hash + Eq + Clone, E: Ord + Clone> Default for AnswerCache<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(names: &[&'static str]) -> AnswerNode<&'static str> {
        names.iter().copied().collect()
    }

    #[test]
    fn uncomputed_lists_have_no_count() {
        let answer: Answer<&str> = Answer::new();
        assert_eq!(answer.individual_count(), None);
        assert!(answer.has_no_known_answers());

        let answer = answer.with_individuals(vec![]);
        assert_eq!(answer.individual_count(), Some(0));
    }

    #[test]
    fn entities_span_all_nodes() {
        let answer = Answer::new()
            .with_individuals(vec![node(&["John"])])
            .with_sub_classes(vec![node(&["man", "male-human"])])
            .with_super_classes(vec![node(&["animal"])]);
        assert_eq!(answer.entities().len(), 4);
        assert!(!answer.has_no_known_answers());
        assert_eq!(answer.sub_class_count(), Some(1));
    }

    #[test]
    fn unsatisfiable_is_not_empty_answer() {
        let answer: Answer<&str> = Answer::unsatisfiable();
        assert!(!answer.is_satisfiable());
        assert!(!answer.has_no_known_answers());
    }

    #[test]
    fn cache_overwrites_explicitly() {
        let mut cache: AnswerCache<String, &str> = AnswerCache::new();
        let question = vec!["Who is a man?".to_string()];
        assert!(cache.set(&question, Answer::new()).is_none());
        assert!(cache.set(&question, Answer::unsatisfiable()).is_some());
        assert_eq!(cache.len(), 1);
        assert!(!cache.get(&question).unwrap().is_satisfiable());

        cache.get_mut(&question).unwrap().set_individuals_complete(true);
        assert!(cache.get(&question).unwrap().individuals_complete());
        assert!(cache.remove(&question).is_some());
        assert!(cache.is_empty());
    }
}
