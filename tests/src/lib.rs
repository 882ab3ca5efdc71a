// FormBridge Tests
//
// This package holds the end-to-end scenarios under e2e/. It has no
// library code of its own.
