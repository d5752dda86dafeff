#![allow(dead_code)]

mod page_workflow_tests;
