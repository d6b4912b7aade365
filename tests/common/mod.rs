#![allow(dead_code)]

use presser::domain::ports::Prompter;
use presser::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

pub fn supported_methods_body() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse><params><param><value><array><data>\
     <value><string>wp.getUsersBlogs</string></value>\
     <value><string>wp.newPost</string></value>\
     <value><string>wp.editPost</string></value>\
     </data></array></value></param></params></methodResponse>"
        .to_string()
}

pub fn string_body(value: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse><params><param><value><string>{}</string></value></param></params></methodResponse>",
        value
    )
}

pub fn fault_body(code: i64, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse><fault><value><struct>\
         <member><name>faultCode</name><value><int>{}</int></value></member>\
         <member><name>faultString</name><value><string>{}</string></value></member>\
         </struct></value></fault></methodResponse>",
        code, message
    )
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn write_site_ini(dir: &Path, name: &str, site: &str) -> PathBuf {
    write_file(
        dir,
        name,
        &format!("[wordpress_site]\nsite = {}\nusername = editor\npassword = secret\n", site),
    )
}

/// Answers prompts from a fixed script and remembers what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn next(&self, prompt: &str) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self
            .answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }
}
