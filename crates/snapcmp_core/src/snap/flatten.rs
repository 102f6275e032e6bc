use crate::snap::DataPoint;

/// One descent from a container into a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<'a> {
	/// Array element index.
	Index(usize),
	/// Object member key.
	Key(&'a str),
}

/// One leaf of a flattened value together with its location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf<'a> {
	/// Rendered location, e.g. `first_head.eyes`, `[5]`, `items.[2]name`.
	///
	/// Array children are prefixed with `[i]` and object members with `key.`.
	/// Empty when the flattened value is itself a leaf. Keys containing `.`
	/// or `[` can make two routes render the same path; use `route` to tell
	/// them apart.
	pub path: &'a str,
	/// Unambiguous steps from the root to this leaf.
	pub route: &'a [Step<'a>],
	/// Leaf value.
	pub value: &'a DataPoint,
}

#[derive(Debug, Clone)]
struct Entry<'a> {
	path: String,
	route: Vec<Step<'a>>,
	value: &'a DataPoint,
}

/// Owned flattening output: `(path, leaf)` pairs in traversal order.
#[derive(Debug, Clone, Default)]
pub struct Flattened<'a> {
	entries: Vec<Entry<'a>>,
}

impl<'a> Flattened<'a> {
	/// Number of leaves.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no leaves were found.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Leaf at traversal position `idx`.
	pub fn get(&self, idx: usize) -> Option<Leaf<'_>> {
		self.entries.get(idx).map(Entry::leaf)
	}

	/// Iterate leaves in traversal order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = Leaf<'_>> {
		self.entries.iter().map(Entry::leaf)
	}
}

impl Entry<'_> {
	fn leaf(&self) -> Leaf<'_> {
		Leaf {
			path: &self.path,
			route: &self.route,
			value: self.value,
		}
	}
}

/// Flatten `value` into its leaves.
///
/// Array elements are visited in index order and object members in key order.
pub fn flatten(value: &DataPoint) -> Flattened<'_> {
	let mut entries = Vec::new();
	let mut route = Vec::new();
	if value.is_leaf() {
		entries.push(Entry {
			path: String::new(),
			route,
			value,
		});
	} else {
		flatten_into(value, "", &mut route, &mut entries);
	}
	Flattened { entries }
}

fn flatten_into<'a>(value: &'a DataPoint, prefix: &str, route: &mut Vec<Step<'a>>, out: &mut Vec<Entry<'a>>) {
	match value {
		DataPoint::Array(items) => {
			for (idx, item) in items.iter().enumerate() {
				route.push(Step::Index(idx));
				descend(item, format!("{prefix}[{idx}]"), "", route, out);
				route.pop();
			}
		}
		DataPoint::Object(item) => {
			for (key, member) in item.iter() {
				route.push(Step::Key(key));
				descend(member, format!("{prefix}{key}"), ".", route, out);
				route.pop();
			}
		}
		_ => {}
	}
}

fn descend<'a>(child: &'a DataPoint, name: String, sep: &str, route: &mut Vec<Step<'a>>, out: &mut Vec<Entry<'a>>) {
	if child.is_leaf() {
		out.push(Entry {
			path: name,
			route: route.clone(),
			value: child,
		});
	} else {
		flatten_into(child, &format!("{name}{sep}"), route, out);
	}
}
