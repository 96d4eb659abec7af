//! Member generation policies, one per child kind.
//!
//! Each function decides which members a parent class gets for one child.
//! They are pure: the same child always yields the same members.

use crate::ir::{ClassChild, ListChild, MarkOp, Member, ValueChild, ValueForm};

/// Members for a leaf child.
///
/// Key leafs are mandatory and get neither `unset` nor marks.
#[must_use]
pub fn leaf_members(leaf: &ValueChild, is_key: bool) -> Vec<Member> {
    let optional = !is_key;
    let mut members = vec![
        Member::Section {
            keyword: if is_key { "key" } else { "leaf" }.to_string(),
            name: leaf.name.clone(),
            optional,
        },
        Member::GetValue(leaf.clone()),
    ];
    members.extend(setters(leaf));
    if optional {
        members.push(Member::UnsetValue(leaf.clone()));
    }
    members.push(Member::AddValue(leaf.clone()));
    if optional {
        members.extend(
            MarkOp::ALL
                .into_iter()
                .map(|op| Member::Mark(leaf.clone(), op, None)),
        );
    }
    members
}

/// Members for a leaf-list child.
#[must_use]
pub fn leaf_list_members(leaf_list: &ValueChild) -> Vec<Member> {
    let mut members = vec![
        Member::Section {
            keyword: "leaf-list".to_string(),
            name: leaf_list.name.clone(),
            optional: false,
        },
        Member::ValueIterator(leaf_list.clone()),
    ];
    members.extend(setters(leaf_list));
    members.push(Member::DeleteValue(leaf_list.clone(), ValueForm::Wrapper));
    members.push(Member::DeleteValue(leaf_list.clone(), ValueForm::String));
    members.push(Member::AddValue(leaf_list.clone()));
    for op in MarkOp::ALL {
        members.push(Member::Mark(leaf_list.clone(), op, Some(ValueForm::Wrapper)));
        members.push(Member::Mark(leaf_list.clone(), op, Some(ValueForm::String)));
    }
    members
}

/// Members for a container child.
#[must_use]
pub fn container_members(container: &ClassChild) -> Vec<Member> {
    vec![
        Member::Section {
            keyword: "container".to_string(),
            name: container.name.clone(),
            optional: false,
        },
        Member::ChildField(container.clone()),
        Member::AddContainer(container.clone()),
        Member::DeleteContainer(container.clone()),
    ]
}

/// Members for a list child.
///
/// Keyed accessors are left out for lists without keys, where they would
/// clash with the unkeyed forms.
#[must_use]
pub fn list_members(list: &ListChild) -> Vec<Member> {
    let keyed = !list.keys.is_empty();
    let mut members = vec![Member::Section {
        keyword: "list".to_string(),
        name: list.child.name.clone(),
        optional: false,
    }];
    if keyed {
        members.push(Member::GetEntry(list.clone(), ValueForm::Wrapper));
        members.push(Member::GetEntry(list.clone(), ValueForm::String));
    }
    members.push(Member::EntryIterator(list.clone()));
    members.push(Member::AttachEntry(list.clone()));
    if keyed {
        members.push(Member::AddEntry(list.clone(), Some(ValueForm::Wrapper)));
        members.push(Member::AddEntry(list.clone(), Some(ValueForm::String)));
    }
    members.push(Member::AddEntry(list.clone(), None));
    if keyed {
        members.push(Member::DeleteEntry(list.clone(), ValueForm::Wrapper));
        members.push(Member::DeleteEntry(list.clone(), ValueForm::String));
    }
    members
}

/// Setter overloads: wrapper, string and, for non-string types, primitive.
fn setters(value: &ValueChild) -> Vec<Member> {
    let mut setters = vec![
        Member::SetValue(value.clone(), ValueForm::Wrapper),
        Member::SetValue(value.clone(), ValueForm::String),
    ];
    if !value.mapping.is_stringlike() {
        setters.push(Member::SetValue(value.clone(), ValueForm::Primitive));
    }
    setters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ValueKind;
    use crate::keys::{KeyLeaf, KeySpec};
    use crate::types::{Primitive, TypeMapping, Wrapper};

    fn value(name: &str, kind: ValueKind, mapping: TypeMapping) -> ValueChild {
        ValueChild {
            name: name.to_string(),
            kind,
            mapping,
        }
    }

    fn count(members: &[Member], pred: impl Fn(&Member) -> bool) -> usize {
        members.iter().filter(|&m| pred(m)).count()
    }

    #[test]
    fn test_optional_leaf() {
        let leaf = value("name", ValueKind::Leaf, TypeMapping::STRING);
        let members = leaf_members(&leaf, false);
        assert_eq!(count(&members, |m| matches!(m, Member::Mark(..))), 4);
        assert_eq!(count(&members, |m| matches!(m, Member::UnsetValue(_))), 1);
        assert_eq!(count(&members, |m| matches!(m, Member::SetValue(..))), 2);
        assert_eq!(count(&members, |m| matches!(m, Member::AddValue(_))), 1);
        assert!(matches!(
            &members[0],
            Member::Section { keyword, optional: true, .. } if keyword == "leaf"
        ));
    }

    #[test]
    fn test_key_leaf() {
        let leaf = value("id", ValueKind::Leaf, TypeMapping::STRING);
        let members = leaf_members(&leaf, true);
        assert_eq!(count(&members, |m| matches!(m, Member::Mark(..))), 0);
        assert_eq!(count(&members, |m| matches!(m, Member::UnsetValue(_))), 0);
        assert_eq!(count(&members, |m| matches!(m, Member::GetValue(_))), 1);
        assert!(matches!(
            &members[0],
            Member::Section { keyword, optional: false, .. } if keyword == "key"
        ));
    }

    #[test]
    fn test_primitive_setter_only_for_non_strings() {
        let leaf = value(
            "port",
            ValueKind::Leaf,
            TypeMapping::new(Wrapper::UnsignedShort, Primitive::Short),
        );
        let members = leaf_members(&leaf, false);
        assert!(members.contains(&Member::SetValue(leaf.clone(), ValueForm::Primitive)));

        let text = value("text", ValueKind::Leaf, TypeMapping::STRING);
        let members = leaf_members(&text, false);
        assert!(!members.contains(&Member::SetValue(text.clone(), ValueForm::Primitive)));
    }

    #[test]
    fn test_leaf_list() {
        let tag = value("tag", ValueKind::LeafList, TypeMapping::STRING);
        let members = leaf_list_members(&tag);
        assert_eq!(count(&members, |m| matches!(m, Member::ValueIterator(_))), 1);
        assert_eq!(count(&members, |m| matches!(m, Member::DeleteValue(..))), 2);
        assert_eq!(count(&members, |m| matches!(m, Member::Mark(..))), 8);
        assert_eq!(
            count(&members, |m| matches!(m, Member::Mark(_, _, Some(ValueForm::String)))),
            4
        );
    }

    #[test]
    fn test_container_child() {
        let child = ClassChild {
            name: "system".to_string(),
            class: "System".to_string(),
        };
        let members = container_members(&child);
        assert_eq!(members.len(), 4);
        assert!(members.contains(&Member::ChildField(child.clone())));
        assert!(members.contains(&Member::AddContainer(child.clone())));
        assert!(members.contains(&Member::DeleteContainer(child)));
    }

    #[test]
    fn test_list_child() {
        let list = ListChild {
            child: ClassChild {
                name: "user".to_string(),
                class: "User".to_string(),
            },
            keys: KeySpec {
                declaration: "name".to_string(),
                keys: vec![KeyLeaf {
                    name: "name".to_string(),
                    mapping: TypeMapping::STRING,
                }],
                all_stringlike: true,
            },
        };
        let members = list_members(&list);
        assert_eq!(count(&members, |m| matches!(m, Member::GetEntry(..))), 2);
        assert_eq!(count(&members, |m| matches!(m, Member::AddEntry(..))), 3);
        assert_eq!(count(&members, |m| matches!(m, Member::AttachEntry(_))), 1);
        assert_eq!(count(&members, |m| matches!(m, Member::DeleteEntry(..))), 2);
        assert_eq!(count(&members, |m| matches!(m, Member::EntryIterator(_))), 1);
    }

    #[test]
    fn test_keyless_list_child() {
        let list = ListChild {
            child: ClassChild {
                name: "log".to_string(),
                class: "Log".to_string(),
            },
            keys: KeySpec::default(),
        };
        let members = list_members(&list);
        assert_eq!(count(&members, |m| matches!(m, Member::GetEntry(..))), 0);
        assert_eq!(count(&members, |m| matches!(m, Member::DeleteEntry(..))), 0);
        assert!(members.contains(&Member::AddEntry(list.clone(), None)));
        assert!(members.contains(&Member::AttachEntry(list)));
    }
}
