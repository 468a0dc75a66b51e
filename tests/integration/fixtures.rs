//! Throwaway Go modules shared by the integration tests

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use aid_metrics::core::ProgressSink;
use tempfile::TempDir;

pub const TEST_MODULE: &str = "github.com/alkbt/testmodule";

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Three packages: pkg1 <- pkg1/pkg2 <- pkg3, and pkg3 -> pkg1
pub fn create_test_module() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "go.mod", &format!("module {}\n\ngo 1.21\n", TEST_MODULE));
    write(
        root,
        "pkg1/pkg1.go",
        r#"package pkg1

import (
	"fmt"
)

// Interface1 is an interface for testing abstractness
type Interface1 interface {
	Method1() string
	Method2() int
}

type Struct1 struct {
	Field1 string
	Field2 int
}

func (s *Struct1) DoSomething() {
	fmt.Println("Doing something from pkg1")
}
"#,
    );
    write(
        root,
        "pkg1/pkg2/pkg2.go",
        r#"package pkg2

import (
	"github.com/alkbt/testmodule/pkg1"
)

type Interface2 interface {
	DoSomethingElse() error
}

type Struct2 struct {
	Pkg1Struct *pkg1.Struct1
}

func (s *Struct2) Process() string {
	s.Pkg1Struct.DoSomething()
	return "Processed in pkg2"
}
"#,
    );
    write(
        root,
        "pkg3/pkg3.go",
        r#"package pkg3

import (
	"github.com/alkbt/testmodule/pkg1"
	"github.com/alkbt/testmodule/pkg1/pkg2"
)

type Struct3 struct {
	Pkg1Data *pkg1.Struct1
	Pkg2Data *pkg2.Struct2
}

func NewStruct3() *Struct3 {
	pkg1Data := &pkg1.Struct1{Field1: "data", Field2: 42}
	return &Struct3{Pkg1Data: pkg1Data, Pkg2Data: &pkg2.Struct2{Pkg1Struct: pkg1Data}}
}

func (s *Struct3) Run() string {
	s.Pkg1Data.DoSomething()
	return s.Pkg2Data.Process()
}
"#,
    );
    dir
}

/// Declaration counting module: a main package and a types package
pub fn create_function_module() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "go.mod", "module example.com/functest\n");
    write(
        root,
        "cmd/main.go",
        r#"package main

import "fmt"

func StandaloneFunc1() string { return "standalone1" }

func StandaloneFunc2() int { return 100 }

type MainInterface1 interface{ MainMethod1() }

type MainInterface2 interface{ MainMethod2() }

type MainStruct1 struct{ Field1 string }

type MainStruct2 struct{ Field2 int }

func (s *MainStruct1) MainMethod1() { fmt.Println("MainMethod1") }

func (s *MainStruct2) MainMethod2() { fmt.Println("MainMethod2") }

func main() {
	fmt.Println(StandaloneFunc1(), StandaloneFunc2())
}
"#,
    );
    write(
        root,
        "pkg/types.go",
        r#"package pkg

type Interface1 interface {
	Method1()
	Method2()
}

type Interface2 interface {
	Method3()
}

type Struct1 struct {
	Field1 string
	Field2 int
}

type Struct2 struct {
	Field3 bool
}

func (s *Struct1) Method1() {}

func (s *Struct1) Method2() {}

func (s *Struct2) Method3() {}

func Function1() string { return "function1" }

func Function2() int { return 42 }

func Function3() bool { return true }

func Function4() {}

type AliasType = string
"#,
    );
    dir
}

/// Progress sink remembering every update
#[derive(Default)]
pub struct RecordingSink {
    pub total: Mutex<Option<u64>>,
    pub updates: Mutex<Vec<(u64, String)>>,
    pub completed: Mutex<usize>,
}

impl RecordingSink {
    pub fn values(&self) -> Vec<u64> {
        self.updates.lock().unwrap().iter().map(|(v, _)| *v).collect()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|(_, d)| d.clone())
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn set_total(&self, total: u64) {
        *self.total.lock().unwrap() = Some(total);
    }

    fn update(&self, value: u64, description: &str) {
        self.updates
            .lock()
            .unwrap()
            .push((value, description.to_string()));
    }

    fn complete(&self) {
        *self.completed.lock().unwrap() += 1;
    }
}
