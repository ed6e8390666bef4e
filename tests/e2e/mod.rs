// End-to-end tests for the chunk-and-synthesize pipeline.
//
// The remote speech service is replaced by a scripted in-memory connector
// (helpers::stub_synthesis) that answers per chunk text, can delay or fail
// individual chunks, and counts opens, closes, calls and peak concurrency.
// The Polly tests point a real SDK client at an unreachable endpoint.

mod test_pipeline;
