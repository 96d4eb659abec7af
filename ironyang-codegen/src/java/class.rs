//! Rendering of container and list classes.

use super::printer::{JavaFile, MAX_COLUMNS, wrap_items};
use crate::ir::{
    ClassChild, ClassKind, ClassUnit, ListChild, MarkOp, Member, ValueChild, ValueForm, ValueKind,
};
use crate::keys::KeySpec;
use crate::naming::capitalize;
use chrono::NaiveDate;

/// Printer for one [`ClassUnit`].
pub struct ClassPrinter<'a> {
    class: &'a ClassUnit,
    date: NaiveDate,
}

impl<'a> ClassPrinter<'a> {
    /// Creates a new class printer.
    #[must_use]
    pub fn new(class: &'a ClassUnit, date: NaiveDate) -> Self {
        Self { class, date }
    }

    /// Renders the complete Java file.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut body = String::new();
        for member in &self.class.members {
            body.push_str(&self.generate_member(member));
        }

        JavaFile {
            class_name: &self.class.name,
            package: &self.class.package,
            description: &self.class.description,
            provenance: &self.class.provenance,
            extends: Some("Container"),
            date: self.date,
        }
        .render(&body)
    }

    /// Renders one member.
    #[must_use]
    pub fn generate_member(&self, member: &Member) -> String {
        match member {
            Member::Constructor(form) => self.generate_constructor(*form),
            Member::Clone { shallow } => self.generate_clone(*shallow),
            Member::KeyNames => self.generate_key_names(),
            Member::ChildrenNames => self.generate_children_names(),
            Member::Section {
                keyword,
                name,
                optional,
            } => section(keyword, name, *optional),
            Member::GetValue(value) => get_value(value),
            Member::SetValue(value, form) => self.generate_set_value(value, *form),
            Member::UnsetValue(value) => unset_value(value),
            Member::AddValue(value) => self.generate_add_value(value),
            Member::Mark(value, op, form) => mark(value, *op, *form),
            Member::ValueIterator(value) => {
                iterator(value.kind.keyword(), &value.name, "LeafListValue")
            }
            Member::DeleteValue(value, form) => delete_value(value, *form),
            Member::ChildField(child) => child_field(child),
            Member::AddContainer(child) => add_container(child),
            Member::DeleteContainer(child) => delete_container(child),
            Member::GetEntry(list, form) => get_entry(list, *form),
            Member::EntryIterator(list) => iterator("list", &list.child.name, "Children"),
            Member::AttachEntry(list) => attach_entry(list),
            Member::AddEntry(list, form) => add_entry(list, *form),
            Member::DeleteEntry(list, form) => delete_entry(list, *form),
            Member::AddChild => self.generate_add_child(),
        }
    }

    fn throws(&self) -> &'static str {
        match self.class.kind {
            ClassKind::List => "\n        throws INMException",
            ClassKind::Container => "",
        }
    }

    fn generate_constructor(&self, form: Option<ValueForm>) -> String {
        let class = self.class;
        let root = &class.root;
        let mut output = String::new();

        let keyed = form.filter(|_| !class.keys.is_empty());
        output.push_str("\n    /**\n");
        match keyed {
            None => output.push_str(&format!(
                "     * Constructor for an empty {} object.\n",
                class.name
            )),
            Some(form) => {
                output.push_str(&format!(
                    "     * Constructor for an initialized {} object.\n",
                    class.name
                ));
                match form {
                    ValueForm::String => output.push_str("     * with Strings for the keys.\n"),
                    ValueForm::Primitive => {
                        output.push_str("     * with primitive Java types.\n");
                    }
                    ValueForm::Wrapper => {}
                }
                for key in class.keys.names() {
                    output.push_str(&format!(
                        "     * @param {key}Value Key argument of child.\n"
                    ));
                }
            }
        }
        output.push_str("     */\n");

        let params = match keyed {
            Some(form) => {
                let params: Vec<String> = class
                    .keys
                    .keys
                    .iter()
                    .map(|k| {
                        let ty = match form {
                            ValueForm::Wrapper => k.mapping.wrapper.java_type(),
                            ValueForm::String => "String".to_string(),
                            ValueForm::Primitive => k.mapping.primitive.java_type().to_string(),
                        };
                        format!("{ty} {}Value", k.name)
                    })
                    .collect();
                let opening = format!("    public {}(", class.name);
                wrap_items(MAX_COLUMNS.saturating_sub(opening.len()), 8, &params)
            }
            None => String::new(),
        };
        output.push_str(&format!(
            "    public {}({params}){} {{\n",
            class.name,
            self.throws()
        ));
        output.push_str(&format!(
            "        super({root}.NAMESPACE, \"{}\");\n",
            class.element
        ));

        if let Some(form) = keyed {
            for key in &class.keys.keys {
                let value = match form {
                    ValueForm::Wrapper => format!("{}Value", key.name),
                    ValueForm::String | ValueForm::Primitive => {
                        format!("new {}({}Value)", key.mapping.wrapper, key.name)
                    }
                };
                output.push_str(&format!("        // Set key element: {}\n", key.name));
                output.push_str(&format!(
                    "        Leaf {0} = new Leaf({root}.NAMESPACE, \"{0}\");\n",
                    key.name
                ));
                output.push_str(&format!("        {}.setValue({value});\n", key.name));
                output.push_str(&format!(
                    "        insertChild({}, childrenNames());\n",
                    key.name
                ));
            }
        }

        if class.top_level {
            output.push_str("        setDefaultPrefix();\n");
            output.push_str(&format!("        setPrefix({root}.PREFIX);\n"));
        }
        output.push_str("    }\n");
        output
    }

    fn generate_clone(&self, shallow: bool) -> String {
        let class = self.class;
        let name = &class.name;
        let mut output = String::new();

        output.push_str("\n    /**\n");
        if shallow {
            output.push_str("     * Clones this object, returning a shallow copy.\n");
            output.push_str("     * @return A clone of the object. Children are not included.\n");
        } else {
            output.push_str("     * Clones this object, returning an exact copy.\n");
            output.push_str("     * @return A clone of the object.\n");
        }
        output.push_str("     */\n");

        let (signature, call) = if shallow {
            ("Element cloneShallow()", "cloneShallowContent".to_string())
        } else {
            ("Object clone()", format!("({name})cloneContent"))
        };
        output.push_str(&format!("    public {signature} {{\n"));

        match class.kind {
            ClassKind::Container => {
                output.push_str(&format!("        return {call}(new {name}());\n"));
            }
            ClassKind::List => {
                let args = if shallow {
                    String::new()
                } else {
                    let getters: Vec<String> = class
                        .keys
                        .names()
                        .map(|k| format!("get{}Value()", capitalize(k)))
                        .collect();
                    let opening = format!("            return {call}(new {name}(");
                    wrap_items(MAX_COLUMNS.saturating_sub(opening.len()), 16, &getters)
                };
                output.push_str("        try {\n");
                output.push_str(&format!(
                    "            return {call}(new {name}({args}));\n"
                ));
                output.push_str("        } catch (INMException e) { return null; }\n");
            }
        }
        output.push_str("    }\n");
        output
    }

    fn generate_key_names(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    /**\n");
        output.push_str("     * Structure information which specifies\n");
        output.push_str("     * the keys for the list entries.\n");
        output.push_str("     */\n");
        output.push_str("    public String[] keyNames() {\n");
        if self.class.keys.is_empty() {
            output.push_str("        return null;\n");
        } else {
            let names: Vec<&str> = self.class.keys.names().collect();
            output.push_str(&string_array(&names));
        }
        output.push_str("    }\n");
        output
    }

    fn generate_children_names(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    /**\n");
        output.push_str("     * Structure information with the names of the children.\n");
        output.push_str("     * Makes it possible to order the children.\n");
        output.push_str("     */\n");
        output.push_str("    public String[] childrenNames() {\n");
        let names: Vec<&str> = self.class.children.iter().map(String::as_str).collect();
        output.push_str(&string_array(&names));
        output.push_str("    }\n");
        output
    }

    fn generate_set_value(&self, value: &ValueChild, form: ValueForm) -> String {
        let name = &value.name;
        let keyword = value.kind.keyword();
        let wrapper = value.mapping.wrapper.java_type();
        let mut output = String::new();

        let (param_type, remark, param_doc) = match form {
            ValueForm::Wrapper => (wrapper.clone(), "", "The value to set."),
            ValueForm::String => (
                "String".to_string(),
                ", using a string value",
                "The string representation of the value to set.",
            ),
            ValueForm::Primitive => (
                value.mapping.primitive.java_type().to_string(),
                ", using the java primitive value",
                "The value to set.",
            ),
        };

        let first_line = format!("     * Sets the value for child {keyword} \"{name}\"");
        output.push_str("\n    /**\n");
        if first_line.len() + remark.len() + 1 > MAX_COLUMNS {
            output.push_str(&format!("{first_line},\n     * {}.\n", &remark[2..]));
        } else {
            output.push_str(&format!("{first_line}{remark}.\n"));
        }
        output.push_str(&format!("     * @param {name}Value {param_doc}\n"));
        output.push_str("     */\n");
        output.push_str(&format!(
            "    public void set{}Value({param_type} {name}Value)\n",
            capitalize(name)
        ));
        output.push_str("        throws INMException {\n");
        match form {
            ValueForm::Wrapper => {
                output.push_str(&format!(
                    "        {}({}.NAMESPACE,\n",
                    setter_call(value.kind),
                    self.class.root
                ));
                output.push_str(&format!("            \"{name}\",\n"));
                output.push_str(&format!("            {name}Value,\n"));
                output.push_str("            childrenNames());\n");
            }
            ValueForm::String | ValueForm::Primitive => {
                output.push_str(&format!(
                    "        set{}Value(new {wrapper}({name}Value));\n",
                    capitalize(name)
                ));
            }
        }
        output.push_str("    }\n");
        output
    }

    fn generate_add_value(&self, value: &ValueChild) -> String {
        let name = &value.name;
        let keyword = value.kind.keyword();
        let method = match value.kind {
            ValueKind::Leaf => format!("add{}", capitalize(name)),
            ValueKind::LeafList => format!("addEmpty{}", capitalize(name)),
        };
        let mut output = String::new();
        output.push_str("\n    /**\n");
        output.push_str("     * This method is used for creating a subtree filter.\n");
        output.push_str(&format!(
            "     * The added \"{name}\" {keyword} will not have a value.\n"
        ));
        output.push_str("     */\n");
        output.push_str(&format!("    public void {method}()\n"));
        output.push_str("        throws INMException {\n");
        output.push_str(&format!(
            "        {}({}.NAMESPACE,\n",
            setter_call(value.kind),
            self.class.root
        ));
        output.push_str(&format!("            \"{name}\",\n"));
        output.push_str("            null,\n");
        output.push_str("            childrenNames());\n");
        output.push_str("    }\n");
        output
    }

    fn generate_add_child(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    /**\n");
        output.push_str("     * -------------------------------------------------------\n");
        output.push_str("     * Support method for addChild.\n");
        output.push_str("     * -------------------------------------------------------\n");
        output.push_str("     */\n");
        output.push_str("\n    /**\n");
        output.push_str("     * Adds a child to this object.\n");
        output.push_str("     */\n");
        output.push_str("    public void addChild(Element child) {\n");
        output.push_str("        super.addChild(child);\n");
        for (i, field) in self.class.fields.iter().enumerate() {
            let branch = if i == 0 { "        if" } else { "        else if" };
            output.push_str(&format!(
                "{branch} (child instanceof {0}) {1} = ({0})child;\n",
                field.class, field.name
            ));
        }
        output.push_str("    }\n");
        output
    }
}

/// Leaf setter of the ConfM runtime for a value kind.
fn setter_call(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Leaf => "setLeafValue",
        ValueKind::LeafList => "setLeafListValue",
    }
}

/// Renders `return new String[] { ... };` with one name per line.
fn string_array(names: &[&str]) -> String {
    let mut output = String::from("        return new String[] {\n");
    let items: Vec<String> = names.iter().map(|n| format!("            \"{n}\"")).collect();
    if !items.is_empty() {
        output.push_str(&items.join(",\n"));
        output.push('\n');
    }
    output.push_str("        };\n");
    output
}

/// Parameter list and XPath predicate for keyed list accessors.
fn key_params(keys: &KeySpec, form: ValueForm) -> (String, String) {
    let params: Vec<String> = keys
        .keys
        .iter()
        .map(|k| match form {
            ValueForm::String => format!("String {}", k.name),
            ValueForm::Wrapper | ValueForm::Primitive => {
                format!("{} {}", k.mapping.wrapper, k.name)
            }
        })
        .collect();
    let predicate: String = keys
        .names()
        .map(|k| format!("[{k}='\" + {k} + \"']"))
        .collect();
    (params.join(", "), predicate)
}

fn key_param_docs(keys: &KeySpec) -> String {
    keys.names()
        .map(|k| format!("     * @param {k} Key argument of child.\n"))
        .collect()
}

fn section(keyword: &str, name: &str, optional: bool) -> String {
    let optional = if optional { "optional " } else { "" };
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str("     * -------------------------------------------------------\n");
    output.push_str(&format!(
        "     * Access methods for {optional}{keyword} child: \"{name}\".\n"
    ));
    output.push_str("     * -------------------------------------------------------\n");
    output.push_str("     */\n");
    output
}

fn get_value(value: &ValueChild) -> String {
    let name = &value.name;
    let keyword = value.kind.keyword();
    let wrapper = value.mapping.wrapper.java_type();
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Return the value for child {keyword} \"{name}\".\n"
    ));
    output.push_str(&format!("     * @return The value of the {keyword}.\n"));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public {wrapper} get{}Value()\n",
        capitalize(name)
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        return ({wrapper})getValue(\"{name}\");\n"));
    output.push_str("    }\n");
    output
}

fn unset_value(value: &ValueChild) -> String {
    let name = &value.name;
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Unsets the value for child {} \"{name}\".\n",
        value.kind.keyword()
    ));
    output.push_str("     */\n");
    output.push_str(&format!("    public void unset{}Value()\n", capitalize(name)));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        delete(\"{name}\");\n"));
    output.push_str("    }\n");
    output
}

fn mark(value: &ValueChild, op: MarkOp, form: Option<ValueForm>) -> String {
    let name = &value.name;
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Marks the \"{name}\" {} with operation \"{}\".\n",
        value.kind.keyword(),
        op.as_str()
    ));

    let (param, path) = match form {
        None => (String::new(), format!("\"{name}\"")),
        Some(form) => {
            let ty = match form {
                ValueForm::String => {
                    output.push_str(&format!(
                        "     * @param {name}Value The value to mark, given as a String.\n"
                    ));
                    "String".to_string()
                }
                ValueForm::Wrapper | ValueForm::Primitive => {
                    output.push_str(&format!("     * @param {name}Value The value to mark.\n"));
                    value.mapping.wrapper.java_type()
                }
            };
            (
                format!("{ty} {name}Value"),
                format!("\"{name}[name='\" + {name}Value + \"']\""),
            )
        }
    };
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public void mark{}{}({param})\n",
        capitalize(name),
        op.method_suffix()
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        markLeaf{}({path});\n", op.method_suffix()));
    output.push_str("    }\n");
    output
}

fn iterator(keyword: &str, name: &str, flavor: &str) -> String {
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!("     * Iterator method for the {keyword} \"{name}\".\n"));
    output.push_str(&format!("     * @return An iterator for the {keyword}.\n"));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public Element{flavor}Iterator {name}Iterator() {{\n"
    ));
    output.push_str(&format!(
        "        return new Element{flavor}Iterator(children, \"{name}\");\n"
    ));
    output.push_str("    }\n");
    output
}

fn delete_value(value: &ValueChild, form: ValueForm) -> String {
    let name = &value.name;
    let ty = match form {
        ValueForm::String => "String".to_string(),
        ValueForm::Wrapper | ValueForm::Primitive => value.mapping.wrapper.java_type(),
    };
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Deletes {} entry \"{name}\".\n",
        value.kind.keyword()
    ));
    if form == ValueForm::String {
        output.push_str("     * The value is specified as a String.\n");
    }
    output.push_str(&format!("     * @param {name}Value Child to be removed.\n"));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public void delete{}({ty} {name}Value)\n",
        capitalize(name)
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!(
        "        String path = \"{name}[name='\" + {name}Value + \"']\";\n"
    ));
    output.push_str("        delete(path);\n");
    output.push_str("    }\n");
    output
}

fn child_field(child: &ClassChild) -> String {
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Field for child container \"{}\".\n",
        child.name
    ));
    output.push_str("     */\n");
    output.push_str(&format!("    public {} {} = null;\n", child.class, child.name));
    output
}

fn add_container(child: &ClassChild) -> String {
    let (class, name) = (&child.class, &child.name);
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Adds container entry \"{name}\", unless it is already present.\n"
    ));
    output.push_str("     * @return The added child.\n");
    output.push_str("     */\n");
    output.push_str(&format!("    public {class} add{}()\n", capitalize(name)));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        if ({name} == null) {{\n"));
    output.push_str(&format!("            {name} = new {class}();\n"));
    output.push_str(&format!("            insertChild({name}, childrenNames());\n"));
    output.push_str("        }\n");
    output.push_str(&format!("        return {name};\n"));
    output.push_str("    }\n");
    output
}

fn delete_container(child: &ClassChild) -> String {
    let name = &child.name;
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!("     * Deletes container entry \"{name}\".\n"));
    output.push_str("     */\n");
    output.push_str(&format!("    public void delete{}()\n", capitalize(name)));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        this.{name} = null;\n"));
    output.push_str(&format!("        String path = \"{name}\";\n"));
    output.push_str("        delete(path);\n");
    output.push_str("    }\n");
    output
}

fn get_entry(list: &ListChild, form: ValueForm) -> String {
    let (class, name) = (&list.child.class, &list.child.name);
    let (params, predicate) = key_params(&list.keys, form);
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!("     * Get method for list entry: \"{name}\".\n"));
    output.push_str("     * Return the child with the specified keys (if any).\n");
    if form == ValueForm::String {
        output.push_str("     * The keys are specified as Strings.\n");
    }
    output.push_str(&key_param_docs(&list.keys));
    output.push_str("     * @return The list entry with the specified keys.\n");
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public {class} get{}({params})\n",
        capitalize(name)
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        String path = \"{name}{predicate}\";\n"));
    output.push_str(&format!("        return ({class})getListContainer(path);\n"));
    output.push_str("    }\n");
    output
}

fn attach_entry(list: &ListChild) -> String {
    let (class, name) = (&list.child.class, &list.child.name);
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!("     * Adds list entry \"{name}\".\n"));
    output.push_str(&format!(
        "     * @param {name} Child to be added to children.\n"
    ));
    output.push_str("     * @return The added child.\n");
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public {class} add{}({class} {name})\n",
        capitalize(name)
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        insertChild({name}, childrenNames());\n"));
    output.push_str(&format!("        return {name};\n"));
    output.push_str("    }\n");
    output
}

fn add_entry(list: &ListChild, form: Option<ValueForm>) -> String {
    let (class, name) = (&list.child.class, &list.child.name);
    let mut output = String::new();
    output.push_str("\n    /**\n");
    let (params, args) = match form {
        None => {
            output.push_str(&format!("     * Adds list entry \"{name}\".\n"));
            output.push_str("     * This method is used for creating subtree filters.\n");
            (String::new(), String::new())
        }
        Some(form) => {
            output.push_str(&format!(
                "     * Adds list entry \"{name}\", with given key arguments.\n"
            ));
            if form == ValueForm::String {
                output.push_str("     * The keys are specified as strings.\n");
            }
            output.push_str(&key_param_docs(&list.keys));
            let (params, _) = key_params(&list.keys, form);
            let args: Vec<&str> = list.keys.names().collect();
            (params, args.join(", "))
        }
    };
    output.push_str("     * @return The added child.\n");
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public {class} add{}({params})\n",
        capitalize(name)
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        {class} {name} = new {class}({args});\n"));
    output.push_str(&format!("        insertChild({name}, childrenNames());\n"));
    output.push_str(&format!("        return {name};\n"));
    output.push_str("    }\n");
    output
}

fn delete_entry(list: &ListChild, form: ValueForm) -> String {
    let name = &list.child.name;
    let (params, predicate) = key_params(&list.keys, form);
    let mut output = String::new();
    output.push_str("\n    /**\n");
    output.push_str(&format!(
        "     * Deletes list entry \"{name}\", with specified keys.\n"
    ));
    if form == ValueForm::String {
        output.push_str("     * The keys are specified as Strings.\n");
    }
    output.push_str(&key_param_docs(&list.keys));
    output.push_str("     */\n");
    output.push_str(&format!(
        "    public void delete{}({params})\n",
        capitalize(name)
    ));
    output.push_str("        throws INMException {\n");
    output.push_str(&format!("        String path = \"{name}{predicate}\";\n"));
    output.push_str("        delete(path);\n");
    output.push_str("    }\n");
    output
}
