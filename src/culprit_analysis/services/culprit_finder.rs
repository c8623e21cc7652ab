use crate::culprit_analysis::domain::{
    CulpritChain, CulpritReport, GraphStore, PackageId, TargetMatcher,
};
use crate::shared::Result;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// One pending step of the search: an import list still to be examined,
/// and the path of packages that led to it.
struct SearchFrame<'a> {
    imports: &'a [PackageId],
    path: Vec<PackageId>,
    on_path: HashSet<&'a PackageId>,
}

/// CulpritFinder service: explains why a target is in a root's closure.
///
/// Breadth-first search over import lists. Only packages whose transitive
/// dependencies still contain the target are expanded, so most of the graph
/// is never visited. A package may be expanded several times under
/// different paths because every chain is reported, but never twice within
/// the same path, which keeps cyclic graphs finite.
pub struct CulpritFinder;

impl CulpritFinder {
    /// Finds every chain from `root` to a package that directly imports a
    /// package matching `matcher`.
    ///
    /// # Errors
    /// `CulpritError::NotFound` if the root, or any package that has to be
    /// inspected, has no record in the store. An incomplete graph is never
    /// reported as "no culprits".
    pub fn find(store: &GraphStore, root: &PackageId, matcher: &TargetMatcher) -> Result<CulpritReport> {
        let mut report = CulpritReport::new(root.clone(), matcher.pattern());
        let root_record = store.get(root)?;

        let mut worklist = VecDeque::new();
        worklist.push_back(SearchFrame {
            imports: &root_record.imports,
            path: vec![root.clone()],
            on_path: HashSet::from([root]),
        });

        let mut expanded = 0usize;
        while let Some(frame) = worklist.pop_front() {
            expanded += 1;

            for import in frame.imports {
                if matcher.matches(import) {
                    report.record(CulpritChain::new(&frame.path, import));
                    continue;
                }

                let record = store.get(import)?;
                if !matcher.matches_any(&record.transitive_deps) {
                    continue;
                }

                if frame.on_path.contains(import) {
                    debug!(package = %import, "skipping cycle back onto current path");
                    continue;
                }

                let mut path = frame.path.clone();
                path.push(import.clone());
                let mut on_path = frame.on_path.clone();
                on_path.insert(import);

                worklist.push_back(SearchFrame {
                    imports: &record.imports,
                    path,
                    on_path,
                });
            }
        }

        debug!(
            root = %root,
            target = matcher.pattern(),
            expanded,
            chains = report.len(),
            "culprit search finished"
        );

        Ok(report)
    }
}
