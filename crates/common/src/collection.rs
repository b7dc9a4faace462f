//! Collection guards, search and filtered conversions.
//!
//! An absent container (`None`) is treated exactly like an empty one, and no
//! helper here panics on it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Anything with a length.
pub trait Collection {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Collection for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T, const N: usize> Collection for [T; N] {
    fn len(&self) -> usize {
        N
    }
}

impl<T> Collection for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> Collection for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T, S> Collection for HashSet<T, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T> Collection for BTreeSet<T> {
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl<K, V, S> Collection for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K, V> Collection for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl Collection for str {
    fn len(&self) -> usize {
        str::len(self)
    }
}

impl Collection for String {
    fn len(&self) -> usize {
        String::len(self)
    }
}

/// `true` when the container is absent or empty.
///
/// # Examples
///
/// ```
/// use nullguard_common::collection::is_empty;
///
/// assert!(is_empty::<Vec<i32>>(None));
/// assert!(is_empty(Some(&Vec::<i32>::new())));
/// assert!(!is_empty(Some(&vec![1])));
/// ```
pub fn is_empty<C: Collection + ?Sized>(coll: Option<&C>) -> bool {
    coll.map_or(true, Collection::is_empty)
}

pub fn is_not_empty<C: Collection + ?Sized>(coll: Option<&C>) -> bool {
    !is_empty(coll)
}

/// Length of the container, `0` when absent.
pub fn size_of<C: Collection + ?Sized>(coll: Option<&C>) -> usize {
    coll.map_or(0, Collection::len)
}

/// Whether `elem` occurs in `coll`.
///
/// `false` when the element is absent, or the container is absent or empty.
pub fn is_in_collection<'a, T, I>(elem: Option<&T>, coll: Option<I>) -> bool
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match (elem, coll) {
        (Some(e), Some(c)) => c.into_iter().any(|item| item == e),
        _ => false,
    }
}

/// Whether `elem` is one of `candidates`.
pub fn is_in_enum_set<E: PartialEq>(elem: Option<&E>, candidates: Option<&[E]>) -> bool {
    match (elem, candidates) {
        (Some(e), Some(set)) => set.iter().any(|c| c == e),
        _ => false,
    }
}

/// First element satisfying `predicate`, `None` for an absent or empty
/// container or when nothing matches.
pub fn find_in_collection<'a, T, I, P>(coll: Option<I>, mut predicate: P) -> Option<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    P: FnMut(&T) -> bool,
{
    coll?.into_iter().find(|item| predicate(*item))
}

/// Runs `func` over every element; a no-op when either side is absent.
pub fn for_each<I, F>(coll: Option<I>, func: Option<F>)
where
    I: IntoIterator,
    F: FnMut(I::Item),
{
    if let (Some(c), Some(f)) = (coll, func) {
        c.into_iter().for_each(f);
    }
}

/// Removes absent entries in place.
pub fn sanitize<T>(coll: Option<&mut Vec<Option<T>>>) {
    if let Some(c) = coll {
        c.retain(Option::is_some);
    }
}

/// Removes entries whose value is absent, in place.
pub fn sanitize_map<K, V, S>(map: Option<&mut HashMap<K, Option<V>, S>>)
where
    K: Eq + Hash,
    S: BuildHasher,
{
    if let Some(m) = map {
        m.retain(|_, v| v.is_some());
    }
}

/// Appends the present `elems` to `list`, creating the list if needed.
///
/// When `elems` itself is absent the list is returned untouched, even if it
/// was absent too.
pub fn add_to_list<T, I>(list: Option<Vec<T>>, elems: Option<I>) -> Option<Vec<T>>
where
    I: IntoIterator<Item = Option<T>>,
{
    match elems {
        Some(elems) => {
            let mut list = list.unwrap_or_default();
            list.extend(elems.into_iter().flatten());
            Some(list)
        }
        None => list,
    }
}

/// Collects the present elements into a `HashSet`.
pub fn to_set<T, I>(elems: I) -> HashSet<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = Option<T>>,
{
    elems.into_iter().flatten().collect()
}

/// Collects the present elements into a `Vec`, keeping their order.
///
/// # Examples
///
/// ```
/// use nullguard_common::collection::to_list;
///
/// assert_eq!(to_list([Some(1), None, Some(3)]), vec![1, 3]);
/// ```
pub fn to_list<T, I>(elems: I) -> Vec<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    elems.into_iter().flatten().collect()
}

/// Collects pairs into a `HashMap`, skipping any pair with an absent side.
/// Later pairs overwrite earlier ones with the same key.
pub fn to_map<K, V, I>(pairs: I) -> HashMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (Option<K>, Option<V>)>,
{
    pairs
        .into_iter()
        .filter_map(|(k, v)| Some((k?, v?)))
        .collect()
}
