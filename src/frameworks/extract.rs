//! Shared extraction algorithm: one pre-order walk over the syntax tree,
//! reconstructing suite nesting with a stack of frames keyed by source-span
//! containment.
//!
//! The traversal visits nodes in document order, not call order, so sibling
//! suites at the same depth must not be mistaken for nested ones: before a
//! frame is consulted or a new one pushed, every frame whose span ended
//! before the current node begins is popped.

use tree_sitter::{Node, Tree};

use crate::errors::{Result, ScanError};
use crate::frameworks::{Framework, MarkerTable};
use crate::inventory::TestRecord;
use crate::syntax::{first_string_arg, identifier_name, literal_text, member_parts, node_text};

/// Transient stack entry for an open suite.
struct SuiteFrame {
    name: String,
    end_offset: usize,
    skipped: bool,
}

/// Walks `tree` once and returns the file's test records in declaration
/// order. An exclusivity marker aborts immediately: the error names file and
/// line, and no partial records are returned.
pub fn extract(
    tree: &Tree,
    file: &str,
    source: &str,
    framework: Framework,
) -> Result<Vec<TestRecord>> {
    let mut ex = Extractor {
        markers: framework.markers(),
        file,
        source,
        stack: Vec::new(),
        tests: Vec::new(),
    };

    let mut cursor = tree.walk();
    'walk: loop {
        let node = cursor.node();
        if node.kind() == "call_expression" {
            ex.visit_call(node)?;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    Ok(ex.tests)
}

struct Extractor<'s> {
    markers: &'static MarkerTable,
    file: &'s str,
    source: &'s str,
    stack: Vec<SuiteFrame>,
    tests: Vec<TestRecord>,
}

impl<'s> Extractor<'s> {
    fn visit_call(&mut self, call: Node) -> Result<()> {
        let Some(callee) = call.child_by_field_name("function") else {
            return Ok(());
        };

        match callee.kind() {
            "identifier" => {
                let name = node_text(callee, self.source);
                if self.markers.suites.contains(&name) {
                    self.open_suite(call, false);
                } else if self.markers.tests.contains(&name) {
                    self.push_test(call, false);
                } else if self.markers.skipped_tests.contains(&name) {
                    self.push_test(call, true);
                }
            }
            "member_expression" => {
                let Some((object, property)) = member_parts(callee, self.source) else {
                    return Ok(());
                };
                if let Some(receiver) = identifier_name(object, self.source) {
                    return self.visit_member_call(call, callee, receiver, property);
                }
                // Data(accounts).Scenario('title', fn): the member's object
                // is itself a call on a data marker.
                if object.kind() == "call_expression"
                    && self.data_receiver(object)
                    && self.markers.tests.contains(&property)
                {
                    self.push_test(call, false);
                }
            }
            // it.each(table)('title', fn): the callee is the inner
            // `it.each(table)` call; the title lives on the outer call.
            "call_expression" if self.markers.each => {
                if let Some(inner_callee) = callee.child_by_field_name("function") {
                    if let Some((object, property)) = member_parts(inner_callee, self.source) {
                        if property == "each" {
                            if let Some(receiver) = identifier_name(object, self.source) {
                                if self.markers.suites.contains(&receiver) {
                                    self.open_suite(call, false);
                                } else if self.markers.tests.contains(&receiver) {
                                    self.push_test(call, false);
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn visit_member_call(
        &mut self,
        call: Node,
        callee: Node,
        receiver: &str,
        property: &str,
    ) -> Result<()> {
        match property {
            "only" if self.markers.exclusive.contains(&receiver) => {
                let line = callee.start_position().row + 1;
                Err(ScanError::exclusive(
                    self.file,
                    line,
                    self.source,
                    callee.start_byte()..callee.end_byte(),
                ))
            }
            "skip" if self.markers.suites.contains(&receiver) => {
                self.open_suite(call, true);
                Ok(())
            }
            "skip" if self.markers.tests.contains(&receiver) => {
                self.push_test(call, true);
                Ok(())
            }
            "todo" if self.markers.todo && self.markers.tests.contains(&receiver) => {
                self.push_test(call, true);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn data_receiver(&self, call: Node) -> bool {
        call.child_by_field_name("function")
            .and_then(|f| identifier_name(f, self.source))
            .map(|name| self.markers.data.contains(&name))
            .unwrap_or(false)
    }

    /// Pops frames for suites that ended before `node` begins. Frames whose
    /// end offset is past the node's start still enclose it.
    fn prune(&mut self, node: Node) {
        let start = node.start_byte();
        self.stack.retain(|frame| frame.end_offset > start);
    }

    fn open_suite(&mut self, call: Node, skipped: bool) {
        let Some(title) = first_string_arg(call) else {
            return;
        };
        if self.markers.flat_suites {
            // A flat suite call scopes everything until the next one.
            self.stack.clear();
            self.stack.push(SuiteFrame {
                name: literal_text(title, self.source).to_string(),
                end_offset: self.source.len(),
                skipped,
            });
            return;
        }
        self.prune(call);
        self.stack.push(SuiteFrame {
            name: literal_text(title, self.source).to_string(),
            end_offset: call.end_byte(),
            skipped,
        });
    }

    fn push_test(&mut self, call: Node, own_skip: bool) {
        let Some(title) = first_string_arg(call) else {
            return;
        };
        self.prune(call);
        // Skip state is resolved at the moment the record is created: the
        // test's own marker OR any currently active ancestor frame. A suite
        // marker discovered later never changes records already emitted.
        let skipped = own_skip || self.stack.iter().any(|f| f.skipped);
        self.tests.push(TestRecord {
            name: literal_text(title, self.source).to_string(),
            suites: self.stack.iter().map(|f| f.name.clone()).collect(),
            file: self.file.to_string(),
            line: call.start_position().row + 1,
            end_line: call.end_position().row + 1,
            code: node_text(call, self.source).to_string(),
            skipped,
            // One position inside the title's closing delimiter, taken from
            // the literal's own span. A token inserted here becomes part of
            // the title, so a re-scan sees it and annotation stays
            // idempotent. Never derived from a text search: duplicate title
            // strings elsewhere in the file cannot corrupt it.
            update_point: title.end_byte() - 1,
        });
    }
}
